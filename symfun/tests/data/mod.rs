#![allow(dead_code)]

use std::path::PathBuf;

pub fn path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    return path;
}

/// Create a new empty directory for the output of a test
pub fn output_dir(test: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    path.push(test);
    if path.exists() {
        std::fs::remove_dir_all(&path).expect("failed to clean output directory");
    }
    std::fs::create_dir_all(&path).expect("failed to create output directory");
    return path;
}
