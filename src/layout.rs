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

use jiff::Zoned;

use crate::severity::Severity;

/// One indent unit, a fixed-width tab equivalent.
pub(crate) const INDENT_UNIT: &str = "    ";

/// The timestamp pattern used when none is configured.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A layout that renders trace messages as bracketed, timestamped text.
///
/// Output format:
///
/// ```text
/// [2025-06-01 22:44:57] [START] --- myapp ---
///     [2025-06-01 22:44:57] Hello!
///     [2025-06-01 22:44:58] [WARNING] disk almost full
///     [2025-06-01 22:44:59] [ERROR]
///         connection reset
///         retrying in 5s
/// ```
///
/// A multi-line message introduces a line break after the header and indents
/// every message line one unit deeper than the header. The severity segment is
/// omitted when the message carries no tag.
///
/// When rendering for an interactive console, the timestamp and severity tag
/// are highlighted with ANSI colors. Highlighting never reaches file sinks.
#[derive(Debug, Clone)]
pub struct TextLayout {
    datetime_format: String,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
        }
    }
}

impl TextLayout {
    /// Creates a new `TextLayout` with the given timestamp pattern.
    ///
    /// The pattern uses `strftime` conversion specifiers. An unrenderable
    /// pattern falls back to [`DEFAULT_DATETIME_FORMAT`] at write time.
    pub fn new(datetime_format: impl Into<String>) -> Self {
        Self {
            datetime_format: datetime_format.into(),
        }
    }

    /// The configured timestamp pattern.
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    pub(crate) fn format(
        &self,
        severity: Option<Severity>,
        message: &str,
        indent: usize,
        colored: bool,
    ) -> String {
        let now = Zoned::now();
        let timestamp = jiff::fmt::strtime::format(&self.datetime_format, &now)
            .unwrap_or_else(|_| now.strftime(DEFAULT_DATETIME_FORMAT).to_string());

        #[cfg(not(feature = "colored"))]
        let _ = colored;

        let mut out = String::new();
        for _ in 0..indent {
            out.push_str(INDENT_UNIT);
        }

        out.push('[');
        #[cfg(feature = "colored")]
        let timestamp = if colored {
            use colored::Colorize;
            timestamp.yellow().to_string()
        } else {
            timestamp
        };
        out.push_str(&timestamp);
        out.push(']');

        if let Some(severity) = severity {
            out.push_str(" [");
            #[cfg(feature = "colored")]
            let tag = if colored {
                use colored::Colorize;
                severity.name().color(severity.color()).to_string()
            } else {
                severity.name().to_owned()
            };
            #[cfg(not(feature = "colored"))]
            let tag = severity.name().to_owned();
            out.push_str(&tag);
            out.push(']');
        }

        // Split at every line break so long messages keep their indentation.
        let lines: Vec<&str> = message
            .split(['\n', '\r'])
            .filter(|line| !line.is_empty())
            .collect();

        match lines.as_slice() {
            // An empty message still produces a header line.
            [] => out.push('\n'),
            [line] => {
                out.push(' ');
                out.push_str(line);
                out.push('\n');
            }
            lines => {
                out.push('\n');
                for line in lines {
                    for _ in 0..=indent {
                        out.push_str(INDENT_UNIT);
                    }
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        out
    }
}
