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

use std::fmt;

/// A classification attached to a trace message.
///
/// Severities are filtering hints and cosmetics only: [`Severity::Verbose`] is
/// the single variant that interacts with filtering (see
/// [`LogEngine::set_show_verbose`][crate::LogEngine::set_show_verbose]); the
/// rest select the uppercase tag rendered in the message header and the
/// console highlight color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An informational message.
    Information,
    /// A noncritical problem.
    Warning,
    /// A recoverable error.
    Error,
    /// A fatal error or application crash.
    Critical,
    /// A debugging trace, suppressed unless verbose output is enabled.
    Verbose,
    /// The start of a logical operation or lifetime.
    Start,
    /// The end of a logical operation or lifetime.
    Stop,
    /// The resumption of a logical operation.
    Resume,
    /// The suspension of a logical operation.
    Suspend,
    /// A change of correlation identity.
    Transfer,
}

impl Severity {
    /// The uppercase tag text rendered in the message header.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Information => "INFORMATION",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Verbose => "VERBOSE",
            Severity::Start => "START",
            Severity::Stop => "STOP",
            Severity::Resume => "RESUME",
            Severity::Suspend => "SUSPEND",
            Severity::Transfer => "TRANSFER",
        }
    }

    /// The console highlight color for this severity.
    #[cfg(feature = "colored")]
    pub(crate) fn color(&self) -> colored::Color {
        use colored::Color;

        match self {
            Severity::Information => Color::Blue,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Critical => Color::Magenta,
            Severity::Verbose => Color::BrightBlack,
            Severity::Start
            | Severity::Stop
            | Severity::Resume
            | Severity::Suspend
            | Severity::Transfer => Color::Cyan,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Information,
            log::Level::Debug | log::Level::Trace => Severity::Verbose,
        }
    }
}
