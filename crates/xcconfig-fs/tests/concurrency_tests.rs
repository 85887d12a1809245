//! Concurrent access tests for write_atomic
//!
//! Verifies that unique temp files, the rename and the fs2 lock on existing
//! destinations keep concurrent writers from corrupting each other.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;
use xcconfig_fs::{NormalizedPath, RobustnessConfig, io};

#[test]
fn test_concurrent_writes_no_corruption() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("concurrent.xcconfig");
    std::fs::write(&file_path, "seed").unwrap();
    let path = Arc::new(NormalizedPath::new(&file_path));

    let num_threads = 10;
    let writes_per_thread = 20;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();

                for i in 0..writes_per_thread {
                    let content = format!("THREAD_{} = write{}\n", thread_id, i);
                    // Losing a lock race is acceptable, corruption is not
                    let _ = io::write_atomic(&path, content.as_bytes(), RobustnessConfig::default());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    let content = std::fs::read_to_string(&file_path).unwrap();
    assert!(
        content.starts_with("THREAD_"),
        "Content should start with 'THREAD_', got: {}",
        &content[..content.len().min(50)]
    );
    assert_eq!(
        content.matches("THREAD_").count(),
        1,
        "Content should hold exactly one complete write"
    );

    // No temp files left behind
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "Found temp files: {:?}", leftovers);
}

#[test]
fn test_concurrent_writes_to_different_files_all_succeed() {
    let dir = tempdir().unwrap();
    let num_threads = 5;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let dir_path = dir.path().to_path_buf();
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();

                let path = NormalizedPath::new(dir_path.join(format!("file_{}.xcconfig", thread_id)));
                let content = format!("VALUE = {}", thread_id);
                io::write_atomic(&path, content.as_bytes(), RobustnessConfig::default()).is_ok()
            })
        })
        .collect();

    for (thread_id, handle) in handles.into_iter().enumerate() {
        assert!(
            handle.join().expect("Thread should not panic"),
            "Write from thread {} should succeed",
            thread_id
        );
    }
}

#[test]
fn test_lock_timeout_is_respected() {
    use fs2::FileExt;

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("locked.xcconfig");
    std::fs::write(&file_path, "original").unwrap();

    // Hold the destination lock from another handle
    let holder = std::fs::File::open(&file_path).unwrap();
    holder.try_lock_exclusive().unwrap();

    let path = NormalizedPath::new(&file_path);
    let config = RobustnessConfig {
        lock_timeout: Duration::from_millis(300),
        enable_fsync: false,
    };

    let result = io::write_atomic(&path, b"content", config);

    FileExt::unlock(&holder).unwrap();

    assert!(
        matches!(result, Err(xcconfig_fs::Error::LockFailed { .. })),
        "Write should fail while the destination is locked, got {:?}",
        result
    );
    assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "original");
}
