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

//! Size-bounded, oldest-first log file eviction.
//!
//! Retention is a greedy sweep over a directory, not an LRU cache: it is
//! invoked on explicit lifecycle events (engine close or an explicit
//! maintenance call) and never on the write hot path.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

/// The default byte quota for a log directory (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    len: u64,
    modified: SystemTime,
}

/// Deletes the oldest files under `dir` until the directory total is at or
/// under `max_bytes`.
///
/// The listing is recomputed from the file system on every call; nothing is
/// persisted between calls. Entries that cannot be read are skipped silently.
///
/// A file whose deletion fails still counts as reclaimed, so the sweep always
/// terminates; the directory can therefore remain over quota when deletes are
/// refused by the OS. See the crate documentation for this trade-off.
pub fn enforce(dir: &Path, max_bytes: u64) {
    let mut files = Vec::new();
    collect_files(dir, &mut files);

    let mut total: u64 = files.iter().map(|f| f.len).sum();
    if total <= max_bytes {
        return;
    }

    // Stable sort: files sharing a timestamp keep their listing order.
    files.sort_by_key(|f| f.modified);

    for file in &files {
        if total <= max_bytes {
            break;
        }
        total = total.saturating_sub(file.len);
        let _ = fs::remove_file(&file.path);
    }
}

fn collect_files(dir: &Path, files: &mut Vec<Candidate>) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };

    for entry in read_dir.flatten() {
        let path = entry.path();
        let Ok(metadata) = entry.metadata() else {
            continue;
        };

        if metadata.is_dir() {
            collect_files(&path, files);
        } else if metadata.is_file() {
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            files.push(Candidate {
                path,
                len: metadata.len(),
                modified,
            });
        }
    }
}
