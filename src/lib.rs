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

//! Boxlog is a bounded-retention diagnostic logging engine: it writes
//! structured, timestamped, verbosity-filtered trace messages to console and
//! file sinks under concurrent access, and evicts the oldest log files once
//! the log directory grows past a byte quota.
//!
//! # Overview
//!
//! Two shapes are supported. An owned [`LogEngine`] carries its own sinks and
//! lifecycle and suits components that need isolation:
//!
//! ```no_run
//! use boxlog::LogEngine;
//! use boxlog::Severity;
//!
//! let engine = LogEngine::builder().console().file("logs").build().unwrap();
//! engine.write("ready").unwrap();
//! engine.write_event("cache miss", Severity::Verbose).unwrap();
//! engine.close();
//! ```
//!
//! The [`global`] module holds a single process-wide engine that lazily
//! attaches a file sink under `Logs/` on first use and is torn down once, at
//! the end of program lifetime:
//!
//! ```no_run
//! boxlog::global::write("application started").unwrap();
//! // ... program runs ...
//! boxlog::global::close();
//! ```
//!
//! `log` crate macros can be routed through the process-wide engine with
//! [`bridge::setup_log_crate`].
//!
//! # Retention
//!
//! Old log files are deleted oldest-first until the directory total drops to
//! the quota (10 MiB by default), either automatically on
//! [`close`][LogEngine::close] or explicitly via
//! [`delete_old_logs`][LogEngine::delete_old_logs]. A file whose deletion
//! fails still counts as reclaimed so the sweep terminates; disk usage can
//! then stay over quota until the next sweep.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod global;
pub mod path;
pub mod retention;
pub mod sink;

mod engine;
mod error;
mod layout;
mod severity;

pub use engine::LogEngine;
pub use engine::LogEngineBuilder;
pub use error::SetupError;
pub use layout::DEFAULT_DATETIME_FORMAT;
pub use layout::TextLayout;
pub use severity::Severity;

/// Create a new [`LogEngineBuilder`]. Equivalent to [`LogEngine::builder`].
pub fn builder() -> LogEngineBuilder {
    LogEngine::builder()
}
