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

//! The process-wide shared engine.
//!
//! A single [`LogEngine`] installed once per process and torn down once via
//! [`close`] at the end of program lifetime. The default engine defers its
//! file sink to the first write: the `Logs` directory and the date-named file
//! inside it are created on demand, and a directory that cannot be created
//! makes the write report failure and drop the message.
//!
//! Components that need isolation (tests in particular) should construct
//! their own [`LogEngine`] instances against isolated directories instead of
//! going through this module.

use std::sync::OnceLock;

use crate::engine::LogEngine;
use crate::error::SetupError;
use crate::severity::Severity;

/// The directory used by the default process-wide engine.
const LOG_FOLDER: &str = "Logs";

static GLOBAL: OnceLock<LogEngine> = OnceLock::new();

/// Installs `engine` as the process-wide engine.
///
/// # Errors
///
/// Fails if a process-wide engine is already installed, including the default
/// one created by an earlier [`write`] or [`get`] call. The rejected engine
/// is closed.
pub fn init(engine: LogEngine) -> Result<(), SetupError> {
    GLOBAL
        .set(engine)
        .map_err(|_| SetupError::AlreadyInitialized)
}

/// The process-wide engine, installing the default lazily on first use.
pub fn get() -> &'static LogEngine {
    GLOBAL.get_or_init(default_engine)
}

/// The process-wide engine, if one has been installed.
pub fn try_get() -> Option<&'static LogEngine> {
    GLOBAL.get()
}

/// Writes an untagged message through the process-wide engine.
pub fn write(message: &str) -> anyhow::Result<()> {
    get().write(message)
}

/// Writes a severity-tagged message through the process-wide engine.
pub fn write_event(message: &str, severity: Severity) -> anyhow::Result<()> {
    get().write_event(message, severity)
}

/// Closes the process-wide engine.
///
/// Meant to be called exactly once, at the end of program lifetime; later
/// writes are dropped without error. An extra call is a no-op.
pub fn close() {
    if let Some(engine) = try_get() {
        engine.close();
    }
}

fn default_engine() -> LogEngine {
    LogEngine::builder()
        .lazy_file(LOG_FOLDER)
        .show_verbose(true)
        .build()
        // Only an eagerly attached file sink can fail to build, and the
        // default engine defers its file sink to the first write.
        .expect("building an engine without eager sinks cannot fail")
}
