//! Concurrent Write calls must never share a destination file.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use xcconfig::{Writer, WriterConfig};

#[test]
fn concurrent_content_writes_do_not_collide() {
    let root = tempfile::tempdir().unwrap();
    let mut config = WriterConfig {
        temp_root: Some(root.path().to_path_buf()),
        ..WriterConfig::default()
    };
    config.robustness.enable_fsync = false;
    let writer = Arc::new(Writer::with_config(&config));

    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let writer = Arc::clone(&writer);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                let content = format!("THREAD_ID = {thread_id}\n");
                barrier.wait();
                let path = writer.write(&content).expect("write should succeed");
                (content, path)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should not panic"))
        .collect();

    let distinct: HashSet<_> = results.iter().map(|(_, path)| path.clone()).collect();
    assert_eq!(distinct.len(), num_threads, "every call needs its own file");

    for (content, path) in &results {
        assert_eq!(&std::fs::read_to_string(path.to_native()).unwrap(), content);
    }
}

#[test]
fn concurrent_path_lookups_return_the_same_file() {
    let root = tempfile::tempdir().unwrap();
    let existing = root.path().join("Shared.xcconfig");
    std::fs::write(&existing, "SHARED = YES").unwrap();
    let input = existing.to_str().unwrap().to_string();
    let writer = Arc::new(Writer::os());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let writer = Arc::clone(&writer);
            let input = input.clone();
            thread::spawn(move || writer.write(&input).unwrap())
        })
        .collect();

    let paths: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(paths.len(), 1);
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "SHARED = YES");
}
