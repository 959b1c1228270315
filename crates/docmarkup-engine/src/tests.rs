//! Shared helpers for unit tests.

use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_source_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Writes `content` to `relative` under the test directory, creating parent
/// directories as needed.
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
