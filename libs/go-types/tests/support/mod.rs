#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Create a temporary module rooted at `module` with the given files.
/// Paths are relative to the module root.
pub fn module(module: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("go.mod"),
        format!("module {module}\n\ngo 1.21\n"),
    )
    .expect("failed to write go.mod");
    write_files(dir.path(), files);
    dir
}

/// Write files below `root`, creating parent directories as needed
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (path, contents) in files {
        let path = root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create directory");
        }
        fs::write(&path, contents).expect("failed to write file");
    }
}
