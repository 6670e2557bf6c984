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

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use boxlog::LogEngine;
use boxlog::Severity;
use tempfile::TempDir;

fn test_engine(dir: &Path) -> LogEngine {
    LogEngine::builder()
        .file_named(dir, "test.log")
        .app_name("testapp")
        .delete_on_close(false)
        .build()
        .expect("failed to build engine")
}

fn read_log(dir: &Path) -> String {
    fs::read_to_string(dir.join("test.log")).expect("failed to read log file")
}

#[test]
fn test_single_line_round_trip() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.write("hello world").unwrap();
    engine.close();

    let content = read_log(temp_dir.path());
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("[START] --- testapp ---"));
    // The message sits on one line: header bracket, one space, text.
    assert!(lines[1].contains("] hello world"));
    assert!(lines[1].trim_start().starts_with('['));
    assert!(lines[2].contains("[STOP] --- testapp ---"));
}

#[test]
fn test_multi_line_message_is_boxed() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.write("a\nb\nc").unwrap();
    engine.close();

    let content = read_log(temp_dir.path());
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 6);
    // Header line carries the timestamp but no message text.
    assert!(lines[1].ends_with(']'));
    // Message lines are indented one unit deeper than the header.
    assert_eq!(lines[2], "        a");
    assert_eq!(lines[3], "        b");
    assert_eq!(lines[4], "        c");
}

#[test]
fn test_verbose_messages_gated_by_default() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    let len_before = fs::metadata(temp_dir.path().join("test.log")).unwrap().len();
    engine.write_event("noisy detail", Severity::Verbose).unwrap();
    let len_after = fs::metadata(temp_dir.path().join("test.log")).unwrap().len();

    // A filtered message produces no bytes on any sink.
    assert_eq!(len_before, len_after);

    engine.write_event("kept", Severity::Information).unwrap();
    let len_final = fs::metadata(temp_dir.path().join("test.log")).unwrap().len();
    assert!(len_final > len_after);

    engine.close();
}

#[test]
fn test_verbose_gate_applies_per_call() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.set_show_verbose(true);
    engine.write_event("first verbose", Severity::Verbose).unwrap();
    engine.set_show_verbose(false);
    engine.write_event("second verbose", Severity::Verbose).unwrap();
    engine.close();

    let content = read_log(temp_dir.path());
    // Flipping the gate never retroactively filters written content.
    assert!(content.contains("first verbose"));
    assert!(!content.contains("second verbose"));
}

#[test]
fn test_disabled_engine_writes_nothing() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = LogEngine::builder()
        .file_named(temp_dir.path(), "test.log")
        .enabled(false)
        .delete_on_close(false)
        .build()
        .unwrap();

    engine.write("dropped").unwrap();
    engine.write_event("also dropped", Severity::Error).unwrap();
    engine.close();

    assert_eq!(read_log(temp_dir.path()), "");
}

#[test]
fn test_double_close_is_safe() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.write("once").unwrap();
    engine.close();
    engine.close();

    let content = read_log(temp_dir.path());
    assert_eq!(content.matches("[STOP]").count(), 1);

    // Writes after close are dropped without error.
    engine.write("after close").unwrap();
    assert!(!read_log(temp_dir.path()).contains("after close"));
}

#[test]
fn test_successive_runs_are_delimited() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");

    let first = test_engine(temp_dir.path());
    first.write("run one").unwrap();
    first.close();

    let second = test_engine(temp_dir.path());
    second.write("run two").unwrap();
    second.close();

    let content = read_log(temp_dir.path());
    assert_eq!(content.matches("[START]").count(), 2);
    // A blank separator line sits between the two runs.
    let blank_lines = content.lines().filter(|line| line.is_empty()).count();
    assert_eq!(blank_lines, 1);
}

#[test]
fn test_attach_file_is_idempotent() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.attach_file(temp_dir.path(), Some("other.log")).unwrap();
    engine.write("only once").unwrap();
    engine.close();

    assert!(!temp_dir.path().join("other.log").exists());
    let content = read_log(temp_dir.path());
    assert_eq!(content.matches("only once").count(), 1);
}

#[test]
fn test_attach_console_is_idempotent() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());

    engine.attach_console();
    engine.attach_console();
    engine.write("fanned out").unwrap();
    engine.close();

    // The file sink receives the message exactly once regardless of how many
    // console attaches were requested.
    let content = read_log(temp_dir.path());
    assert_eq!(content.matches("fanned out").count(), 1);
}

#[test]
fn test_manual_flush_without_auto_flush() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = LogEngine::builder()
        .file_named(temp_dir.path(), "test.log")
        .app_name("testapp")
        .auto_flush(false)
        .delete_on_close(false)
        .build()
        .unwrap();

    engine.write("buffered eventually lands").unwrap();
    engine.flush();

    assert!(read_log(temp_dir.path()).contains("buffered eventually lands"));
    engine.close();
}

#[test]
fn test_default_filename_is_current_date() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = LogEngine::builder()
        .file(temp_dir.path())
        .delete_on_close(false)
        .build()
        .unwrap();

    let expected = format!("{}.log", jiff::Zoned::now().strftime("%Y-%m-%d"));
    assert!(temp_dir.path().join(&expected).exists());
    assert_eq!(engine.log_dir().as_deref(), Some(temp_dir.path()));

    engine.close();
}

#[test]
fn test_reserved_filename_characters_are_replaced() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = LogEngine::builder()
        .file_named(temp_dir.path(), "bad:name?.log")
        .delete_on_close(false)
        .build()
        .unwrap();
    engine.close();

    assert!(temp_dir.path().join("bad_name_.log").exists());
}

#[test]
fn test_lazy_attach_failure_drops_message_and_retries() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let log_dir = temp_dir.path().join("blocked");

    // A plain file where the directory should go makes creation fail.
    fs::write(&log_dir, b"in the way").unwrap();

    let engine = LogEngine::builder()
        .lazy_file(&log_dir)
        .delete_on_close(false)
        .build()
        .unwrap();

    assert!(engine.write("dropped").is_err());

    // Once the obstruction is gone the next write attaches and succeeds.
    fs::remove_file(&log_dir).unwrap();
    engine.write("delivered").unwrap();
    engine.close();

    let entries: Vec<_> = fs::read_dir(&log_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let content = fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("delivered"));
    assert!(!content.contains("dropped"));
}

#[test]
fn test_delete_old_logs_evicts_oldest_first() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = test_engine(temp_dir.path());
    engine.write("current").unwrap();

    const MIB: u64 = 1024 * 1024;
    thread::sleep(Duration::from_millis(20));
    fs::write(temp_dir.path().join("old.log"), vec![b'x'; MIB as usize]).unwrap();
    thread::sleep(Duration::from_millis(20));
    fs::write(temp_dir.path().join("new.log"), vec![b'x'; MIB as usize]).unwrap();

    // test.log is oldest, then old.log; a 1.5 MiB quota evicts both.
    engine.delete_old_logs(Some(MIB + MIB / 2));

    assert!(!temp_dir.path().join("old.log").exists());
    assert!(temp_dir.path().join("new.log").exists());

    engine.close();
}

#[test]
fn test_close_runs_retention_when_configured() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");

    fs::write(temp_dir.path().join("ancient.log"), vec![b'x'; 64 * 1024]).unwrap();
    thread::sleep(Duration::from_millis(20));

    let engine = LogEngine::builder()
        .file_named(temp_dir.path(), "test.log")
        .app_name("testapp")
        .max_bytes(1024)
        .build()
        .unwrap();
    engine.write("fresh").unwrap();
    engine.close();

    assert!(!temp_dir.path().join("ancient.log").exists());
}

#[test]
fn test_concurrent_writes_do_not_interleave() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let engine = Arc::new(test_engine(temp_dir.path()));

    let threads = 8;
    let per_thread = 25;
    let padding = "x".repeat(100);

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let engine = Arc::clone(&engine);
            let padding = padding.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    engine
                        .write(&format!("thread-{t} message-{i} {padding}"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    engine.close();

    let content = read_log(temp_dir.path());
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), threads * per_thread + 2);

    // Every message block is well formed: no torn headers, no split payloads.
    for line in &lines {
        assert!(line.trim_start().starts_with('['), "torn line: {line:?}");
    }
    for t in 0..threads {
        for i in 0..per_thread {
            let needle = format!("thread-{t} message-{i} {padding}");
            assert_eq!(
                content.matches(&needle).count(),
                1,
                "message written other than exactly once: {needle}"
            );
        }
    }
}
