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

use std::io::Write;

use crate::sink::Sink;
use crate::sink::SinkKind;

/// A sink that prints rendered text to stdout.
///
/// With the `colored` feature enabled, the engine renders a highlighted
/// variant of each message for this sink. The `colored` crate suppresses
/// escape sequences when stdout is not an interactive console, so redirected
/// output receives the plain byte stream.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    closed: bool,
}

impl ConsoleSink {
    /// Creates a new `ConsoleSink`.
    pub fn new() -> Self {
        Self { closed: false }
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, text: &str) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        std::io::stdout().write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        if self.closed {
            return Ok(());
        }
        std::io::stdout().flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            let _ = std::io::stdout().flush();
            self.closed = true;
        }
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn colored(&self) -> bool {
        cfg!(feature = "colored")
    }
}
