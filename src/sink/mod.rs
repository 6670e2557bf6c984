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

//! Output destinations for rendered trace text.

use std::fmt;

mod console;
mod file;

pub use self::console::ConsoleSink;
pub use self::file::FileSink;

/// The kind of destination behind a [`Sink`].
///
/// An engine attaches at most one sink of each kind; a second attach of the
/// same kind is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// The process standard output.
    Console,
    /// An append-mode log file.
    File,
}

/// A single output destination for rendered trace text.
///
/// A sink is owned exclusively by the engine that attached it and is closed
/// exactly once when the engine detaches it.
pub trait Sink: fmt::Debug + Send + 'static {
    /// Appends rendered text to the destination.
    fn write(&mut self, text: &str) -> anyhow::Result<()>;

    /// Forces buffered data out to the backing store.
    fn flush(&mut self) -> anyhow::Result<()>;

    /// Releases the underlying resource. Must be idempotent; writes after
    /// close are silently discarded.
    fn close(&mut self);

    /// The kind of destination, used for per-kind attach idempotence.
    fn kind(&self) -> SinkKind;

    /// Whether this sink renders console highlight colors.
    fn colored(&self) -> bool {
        false
    }
}
