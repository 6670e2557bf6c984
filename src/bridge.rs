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

//! Bridge from the `log` crate facade to the process-wide engine.
//!
//! `log::Level` collapses onto the flat severity set: `Error`, `Warn`, and
//! `Info` keep their tags while `Debug` and `Trace` become
//! [`Severity::Verbose`] and follow the verbose gate.

use crate::global;
use crate::severity::Severity;

struct LogCrateForwarder(());

impl log::Log for LogCrateForwarder {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        global::try_get().is_none_or(|engine| engine.enabled())
    }

    fn log(&self, record: &log::Record) {
        let severity = Severity::from(record.level());
        let message = record.args().to_string();
        // Faults are already suppressed engine-side; a bridge cannot
        // propagate them anywhere useful.
        let _ = global::write_event(&message, severity);
    }

    fn flush(&self) {
        if let Some(engine) = global::try_get() {
            engine.flush();
        }
    }
}

/// Routes `log` crate macros through the process-wide engine.
///
/// This should be called early in the execution of a Rust program. Any log
/// events that occur before initialization are ignored.
///
/// # Errors
///
/// Returns an error if the log crate global logger has already been set.
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static FORWARDER: LogCrateForwarder = LogCrateForwarder(());
    log::set_logger(&FORWARDER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Routes `log` crate macros through the process-wide engine.
///
/// # Panics
///
/// Panics if the log crate global logger has already been set.
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "boxlog::bridge::setup_log_crate must be called before the log crate global logger is initialized",
    );
}
