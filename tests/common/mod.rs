/*!
 * Common test utilities for the easysubs test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two overlapping cues used across lookup tests
pub const OVERLAPPING_DOCUMENT: &str = "1
00:00:01,000 --> 00:00:03,000
A

2
00:00:02,000 --> 00:00:04,000
B
";

/// Routes library logs to the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}
