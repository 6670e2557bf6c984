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

//! Filesystem name sanitization.
//!
//! Every directory or file name handed to a file sink passes through these
//! helpers first, so a caller-supplied name can never smuggle reserved
//! characters into the file system.

/// Characters rejected in a path on common filesystems.
const INVALID_PATH_CHARS: &[char] = &['<', '>', '"', '|'];

/// Characters rejected in a file name, including path separators.
const INVALID_FILE_CHARS: &[char] = &['<', '>', '"', '|', ':', '*', '?', '/', '\\'];

/// Replaces characters that are invalid in a filesystem path with
/// `replacement`. Path separators are kept.
pub fn sanitize_path(input: &str, replacement: char) -> String {
    replace_invalid(input, INVALID_PATH_CHARS, replacement)
}

/// Replaces characters that are invalid in a file name with `replacement`.
pub fn sanitize_file_name(input: &str, replacement: char) -> String {
    replace_invalid(input, INVALID_FILE_CHARS, replacement)
}

fn replace_invalid(input: &str, invalid: &[char], replacement: char) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_control() || invalid.contains(&c) {
                replacement
            } else {
                c
            }
        })
        .collect()
}
