use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use assert_fs::TempDir;
use assert_fs::prelude::*;
use submission_move::move_file;
use submission_move::platform::open_log_file_secure_append;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes into a shared in-memory buffer.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn move_emits_structured_json_event() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .event_format(tsfmt::format().json())
        .with_writer(make_writer);
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));

    let temp = TempDir::new().unwrap();
    let f = temp.child("source/sub/a.txt");
    f.write_str("x").unwrap();

    tracing::dispatcher::with_default(&dispatch, || {
        move_file(temp.child("source").path(), f.path(), temp.child("target").path()).unwrap();
    });

    let contents = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
    let events: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let moved = events
        .iter()
        .find(|e| e["fields"]["message"] == "Renamed file atomically")
        .unwrap_or_else(|| panic!("no rename event in {contents}"));
    assert_eq!(moved["level"], "INFO");
    assert!(moved["fields"]["dest"].as_str().unwrap().ends_with("a.txt"));
}

#[test]
fn file_logging_writes_to_custom_path() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.child("logs/submission_move_test.log");

    if submission_move::path_has_symlink_ancestor(log_path.path()).unwrap() {
        eprintln!("Skipping: path has symlink ancestor: {}", log_path.path().display());
        return;
    }

    let file = open_log_file_secure_append(log_path.path()).expect("open log file");
    let (writer, guard): (tracing_appender::non_blocking::NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file);
    let file_layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_target(false)
        .compact();
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(file_layer));

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("file-logging-test: written");
    });
    drop(guard);

    let contents = std::fs::read_to_string(log_path.path()).expect("read log file");
    assert!(contents.contains("file-logging-test"), "contents={contents}");
}
