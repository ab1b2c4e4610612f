//! Common test utilities shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Create a temporary project with the given files.
pub fn project_with_files(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    for (path, content) in files {
        let full_path = dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("failed to write file");
    }

    dir
}

/// Absolute path of a file inside the project, as the graph keys it.
#[allow(dead_code)]
pub fn key(dir: &TempDir, path: &str) -> PathBuf {
    minipacco::resolver::absolutize(&dir.path().join(path)).expect("path should resolve")
}

/// Path to the compiled binary under test.
#[allow(dead_code)]
pub fn binary() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_minipacco"))
}
