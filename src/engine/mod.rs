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

//! The engine that owns sinks, serializes writes, and manages lifecycle.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use jiff::Zoned;

use crate::layout::TextLayout;
use crate::path;
use crate::retention;
use crate::severity::Severity;
use crate::sink::ConsoleSink;
use crate::sink::FileSink;
use crate::sink::Sink;
use crate::sink::SinkKind;

mod builder;

pub use self::builder::LogEngineBuilder;

/// File sink configuration held back until the first write. Singleton-style
/// lifecycles attach their file lazily instead of at construction.
#[derive(Debug, Clone)]
struct PendingFile {
    dir: PathBuf,
    filename: Option<String>,
}

#[derive(Debug)]
struct Inner {
    enabled: bool,
    show_verbose: bool,
    auto_flush: bool,
    indent: usize,
    sinks: Vec<Box<dyn Sink>>,
    log_dir: Option<PathBuf>,
    pending_file: Option<PendingFile>,
    started: bool,
    closed: bool,
}

/// A diagnostic logging engine.
///
/// The engine fans structured, timestamped messages out to its attached
/// [sinks][Sink], filters verbose-tagged messages behind a flat gate, and
/// evicts the oldest files in its log directory once their total size exceeds
/// a byte quota.
///
/// A single mutex guards the entire write sequence (gate check, formatting,
/// fan-out, flush, indent mutation), so each [`write`][LogEngine::write] call
/// is atomic with respect to other writes and to [`close`][LogEngine::close]
/// on the same engine. Independent engines own disjoint sinks and never
/// contend with each other.
///
/// A logging fault never aborts the host process: sink I/O errors are
/// reported through the returned `Result` and otherwise suppressed.
///
/// # Examples
///
/// ```no_run
/// use boxlog::LogEngine;
/// use boxlog::Severity;
///
/// let engine = LogEngine::builder()
///     .console()
///     .file("logs")
///     .build()
///     .unwrap();
///
/// engine.write("service listening on :8080").unwrap();
/// engine.write_event("handshake timed out", Severity::Warning).unwrap();
/// engine.close();
/// ```
#[derive(Debug)]
pub struct LogEngine {
    layout: TextLayout,
    app_name: String,
    delete_on_close: bool,
    max_bytes: u64,
    inner: Mutex<Inner>,
}

impl LogEngine {
    /// Creates a new [`LogEngineBuilder`].
    #[must_use]
    pub fn builder() -> LogEngineBuilder {
        LogEngineBuilder::new()
    }

    /// Writes an untagged message to every attached sink.
    ///
    /// Returns `Ok(())` when the message was filtered out; an error is
    /// reported only for I/O faults during fan-out. On a fault the remaining
    /// sinks are still written and the first fault is returned.
    pub fn write(&self, message: &str) -> anyhow::Result<()> {
        let mut inner = self.lock();
        self.write_locked(&mut inner, None, message)
    }

    /// Writes a severity-tagged message to every attached sink.
    ///
    /// Messages tagged [`Severity::Verbose`] are dropped before any
    /// formatting cost unless verbose output is enabled.
    pub fn write_event(&self, message: &str, severity: Severity) -> anyhow::Result<()> {
        let mut inner = self.lock();
        self.write_locked(&mut inner, Some(severity), message)
    }

    /// Attaches a console sink. A no-op if one is already attached or the
    /// engine is closed.
    pub fn attach_console(&self) {
        let mut inner = self.lock();
        if inner.closed || inner.sinks.iter().any(|s| s.kind() == SinkKind::Console) {
            return;
        }
        inner.sinks.push(Box::new(ConsoleSink::new()));
    }

    /// Attaches a file sink under `dir`. A no-op if one is already attached
    /// or the engine is closed.
    ///
    /// Reserved path characters in `dir` and `filename` are replaced with
    /// `_`. When `filename` is omitted the file is named after the current
    /// date, `{yyyy-MM-dd}.log`. The directory is created if missing. If the
    /// target file already existed, a blank separator line is written first
    /// so successive process runs are visually delimited within one file.
    pub fn attach_file(&self, dir: impl AsRef<Path>, filename: Option<&str>) -> anyhow::Result<()> {
        let mut inner = self.lock();
        if inner.closed {
            return Ok(());
        }
        self.attach_file_locked(&mut inner, dir.as_ref(), filename)
    }

    /// Whether writes are currently enabled.
    pub fn enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Gates all writes.
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    /// Whether verbose-tagged messages are written.
    pub fn show_verbose(&self) -> bool {
        self.lock().show_verbose
    }

    /// Gates verbose-tagged messages. The gate applies per call, never
    /// retroactively.
    pub fn set_show_verbose(&self, show_verbose: bool) {
        self.lock().show_verbose = show_verbose;
    }

    /// Whether every write forces a sink flush.
    pub fn auto_flush(&self) -> bool {
        self.lock().auto_flush
    }

    /// Sets whether every write forces a sink flush.
    pub fn set_auto_flush(&self, auto_flush: bool) {
        self.lock().auto_flush = auto_flush;
    }

    /// The directory the file sink writes into, if one is configured.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.lock().log_dir.clone()
    }

    /// Flushes every attached sink, suppressing I/O faults.
    pub fn flush(&self) {
        let mut inner = self.lock();
        for sink in &mut inner.sinks {
            let _ = sink.flush();
        }
    }

    /// Closes the engine: writes the end-of-lifetime marker, closes every
    /// sink exactly once, and runs retention against the log directory when
    /// configured to clean up on close.
    ///
    /// Calling `close` twice is safe; the second call is a no-op. Writes
    /// after close are dropped without error.
    pub fn close(&self) {
        let mut inner = self.lock();
        if inner.closed {
            return;
        }
        inner.closed = true;

        if inner.started {
            self.end_locked(&mut inner);
        }

        for sink in &mut inner.sinks {
            sink.close();
        }
        inner.sinks.clear();
        inner.pending_file = None;

        if self.delete_on_close {
            if let Some(dir) = inner.log_dir.clone() {
                retention::enforce(&dir, self.max_bytes);
            }
        }
    }

    /// Runs size-bounded eviction against the configured log directory
    /// without closing the engine. `max_bytes` defaults to the engine quota.
    pub fn delete_old_logs(&self, max_bytes: Option<u64>) {
        let dir = self.lock().log_dir.clone();
        if let Some(dir) = dir {
            // Intentionally outside the write lock: retention scans the file
            // system and must not contend with the write path.
            retention::enforce(&dir, max_bytes.unwrap_or(self.max_bytes));
        }
    }

    // A poisoned lock still yields usable state; the engine must never be the
    // cause of an unhandled termination in the host process.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_locked(
        &self,
        inner: &mut Inner,
        severity: Option<Severity>,
        message: &str,
    ) -> anyhow::Result<()> {
        if inner.closed || !inner.enabled {
            return Ok(());
        }
        if severity == Some(Severity::Verbose) && !inner.show_verbose {
            return Ok(());
        }

        // A failed lazy attach drops the message; the pending configuration
        // is kept so the next write retries.
        self.attach_pending_file(inner)?;
        if !inner.started && !inner.sinks.is_empty() {
            self.start_locked(inner);
        }

        self.emit(inner, severity, message)
    }

    fn emit(
        &self,
        inner: &mut Inner,
        severity: Option<Severity>,
        message: &str,
    ) -> anyhow::Result<()> {
        let indent = inner.indent;
        let auto_flush = inner.auto_flush;

        let plain = self.layout.format(severity, message, indent, false);
        let mut highlighted: Option<String> = None;
        let mut first_err: Option<anyhow::Error> = None;

        for sink in &mut inner.sinks {
            let text: &str = if sink.colored() {
                highlighted
                    .get_or_insert_with(|| self.layout.format(severity, message, indent, true))
            } else {
                &plain
            };

            if let Err(err) = sink.write(text) {
                if first_err.is_none() {
                    first_err = Some(err);
                }
                continue;
            }
            if auto_flush {
                if let Err(err) = sink.flush() {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn attach_pending_file(&self, inner: &mut Inner) -> anyhow::Result<()> {
        let Some(pending) = inner.pending_file.clone() else {
            return Ok(());
        };
        self.attach_file_locked(inner, &pending.dir, pending.filename.as_deref())?;
        inner.pending_file = None;
        Ok(())
    }

    fn attach_file_locked(
        &self,
        inner: &mut Inner,
        dir: &Path,
        filename: Option<&str>,
    ) -> anyhow::Result<()> {
        if inner.sinks.iter().any(|s| s.kind() == SinkKind::File) {
            return Ok(());
        }

        let dir = PathBuf::from(path::sanitize_path(&dir.to_string_lossy(), '_'));
        let filename = match filename {
            Some(name) => path::sanitize_file_name(name, '_'),
            None => default_filename(),
        };

        let mut sink = FileSink::open(dir.join(filename))?;
        if sink.existed() {
            let _ = sink.write("\n");
        }

        inner.log_dir = Some(dir);
        inner.sinks.push(Box::new(sink));
        Ok(())
    }

    // The lifetime markers honor the `enabled` gate like any other write,
    // but the indent bracket moves either way.
    fn start_locked(&self, inner: &mut Inner) {
        if inner.enabled {
            let marker = format!("--- {} ---", self.app_name);
            let _ = self.emit(inner, Some(Severity::Start), &marker);
        }
        inner.indent += 1;
        inner.started = true;
    }

    fn end_locked(&self, inner: &mut Inner) {
        inner.indent = inner.indent.saturating_sub(1);
        if inner.enabled {
            let marker = format!("--- {} ---", self.app_name);
            let _ = self.emit(inner, Some(Severity::Stop), &marker);
        }
    }
}

impl Drop for LogEngine {
    fn drop(&mut self) {
        self.close();
    }
}

fn default_filename() -> String {
    format!("{}.log", Zoned::now().strftime("%Y-%m-%d"))
}

fn default_app_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}
