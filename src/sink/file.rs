// Copyright 2025 BoxLog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;

use crate::sink::Sink;
use crate::sink::SinkKind;

/// A sink that appends rendered text to a single log file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<File>,
    existed: bool,
}

impl FileSink {
    /// Opens `path` in append mode, creating parent directories if absent.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<FileSink> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("failed to create log directory")?;
        }

        let existed = path.exists();
        let writer = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .context("failed to create log file")?;

        Ok(FileSink {
            path,
            writer: Some(writer),
            existed,
        })
    }

    /// The path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file was already present when this sink opened it. Used to
    /// delimit successive process runs sharing one file.
    pub(crate) fn existed(&self) -> bool {
        self.existed
    }
}

impl Sink for FileSink {
    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer
                .write_all(text.as_bytes())
                .context("failed to write log file")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().context("failed to flush log file")?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }

    fn kind(&self) -> SinkKind {
        SinkKind::File
    }
}
