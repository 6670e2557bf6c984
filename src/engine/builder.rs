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

use std::path::PathBuf;
use std::sync::Mutex;

use crate::layout::TextLayout;
use crate::retention::DEFAULT_MAX_BYTES;
use crate::sink::ConsoleSink;

use super::Inner;
use super::LogEngine;
use super::PendingFile;
use super::default_app_name;

/// A builder for configuring a [`LogEngine`].
///
/// ```no_run
/// use boxlog::LogEngine;
///
/// let engine = LogEngine::builder()
///     .console()
///     .file_named("logs", "service.log")
///     .show_verbose(true)
///     .max_bytes(4 * 1024 * 1024)
///     .build()
///     .unwrap();
/// ```
#[must_use = "call `build` to construct the engine"]
#[derive(Debug)]
pub struct LogEngineBuilder {
    console: bool,
    file: Option<(PathBuf, Option<String>)>,
    lazy_file: Option<PathBuf>,
    enabled: bool,
    show_verbose: bool,
    auto_flush: bool,
    datetime_format: Option<String>,
    delete_on_close: bool,
    max_bytes: u64,
    app_name: Option<String>,
}

impl Default for LogEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEngineBuilder {
    /// Creates a new `LogEngineBuilder`.
    pub fn new() -> Self {
        Self {
            console: false,
            file: None,
            lazy_file: None,
            enabled: true,
            show_verbose: false,
            auto_flush: true,
            datetime_format: None,
            delete_on_close: true,
            max_bytes: DEFAULT_MAX_BYTES,
            app_name: None,
        }
    }

    /// Attaches a console sink at construction.
    pub fn console(mut self) -> Self {
        self.console = true;
        self
    }

    /// Attaches a file sink under `dir` at construction, named after the
    /// current date.
    pub fn file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file = Some((dir.into(), None));
        self
    }

    /// Attaches a file sink at construction with an explicit file name.
    pub fn file_named(mut self, dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        self.file = Some((dir.into(), Some(filename.into())));
        self
    }

    /// Defers the file sink to the first write. The directory is created and
    /// the date-named file opened on demand; until then writes reach only the
    /// other attached sinks, and a directory that cannot be created makes the
    /// write report failure and drop the message.
    pub fn lazy_file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lazy_file = Some(dir.into());
        self
    }

    /// Gates all writes. Defaults to `true`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Gates verbose-tagged messages. Defaults to `false`.
    pub fn show_verbose(mut self, show_verbose: bool) -> Self {
        self.show_verbose = show_verbose;
        self
    }

    /// Sets whether every write forces a sink flush. Defaults to `true`.
    pub fn auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    /// Sets the timestamp pattern, in `strftime` conversion specifiers.
    /// Defaults to [`DEFAULT_DATETIME_FORMAT`][crate::DEFAULT_DATETIME_FORMAT].
    pub fn datetime_format(mut self, datetime_format: impl Into<String>) -> Self {
        self.datetime_format = Some(datetime_format.into());
        self
    }

    /// Sets whether [`close`][LogEngine::close] runs retention against the
    /// log directory. Defaults to `true`.
    pub fn delete_on_close(mut self, delete_on_close: bool) -> Self {
        self.delete_on_close = delete_on_close;
        self
    }

    /// Sets the retention byte quota. Defaults to 10 MiB.
    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Sets the identifying name written in the start and end markers.
    /// Defaults to the current executable's file stem.
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Builds the [`LogEngine`], attaching the configured sinks and writing
    /// the start-of-lifetime marker.
    ///
    /// # Errors
    ///
    /// Fails if an eagerly configured file sink cannot be opened.
    pub fn build(self) -> anyhow::Result<LogEngine> {
        let layout = match self.datetime_format {
            Some(format) => TextLayout::new(format),
            None => TextLayout::default(),
        };
        let app_name = self.app_name.unwrap_or_else(default_app_name);

        let engine = LogEngine {
            layout,
            app_name,
            delete_on_close: self.delete_on_close,
            max_bytes: self.max_bytes,
            inner: Mutex::new(Inner {
                enabled: self.enabled,
                show_verbose: self.show_verbose,
                auto_flush: self.auto_flush,
                indent: 0,
                sinks: vec![],
                log_dir: None,
                pending_file: self.lazy_file.map(|dir| PendingFile {
                    dir,
                    filename: None,
                }),
                started: false,
                closed: false,
            }),
        };

        {
            let mut inner = engine.lock();
            if self.console {
                inner.sinks.push(Box::new(ConsoleSink::new()));
            }
            if let Some((dir, filename)) = self.file {
                engine.attach_file_locked(&mut inner, &dir, filename.as_deref())?;
            }
            if !inner.sinks.is_empty() {
                engine.start_locked(&mut inner);
            }
        }

        Ok(engine)
    }
}
