#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use hoog_codegen::{GenerationConfig, Location};
use hoog_format::FormatterChoice;
use tempfile::TempDir;

/// Sources of the `instance` fixture package
pub const INSTANCE_GO: &str = include_str!("../fixtures/instance/instance.go");

/// Directory holding the checked-in fixture module
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Create a temporary module rooted at `module` with the given files
pub fn module(module: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(
        dir.path().join("go.mod"),
        format!("module {module}\n\ngo 1.21\n"),
    )
    .expect("failed to write go.mod");

    for (path, contents) in files {
        let path = dir.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create directory");
        }
        fs::write(&path, contents).expect("failed to write file");
    }
    dir
}

/// Module `example.com/m` with the fixture package under `instance/`
pub fn instance_module() -> TempDir {
    module("example.com/m", &[("instance/instance.go", INSTANCE_GO)])
}

/// Location for a directory and object, bypassing string parsing so
/// temporary paths with dots stay intact
pub fn location(dir: &Path, object: &str) -> Location {
    Location::new(dir.to_string_lossy().into_owned(), object)
}

/// Config that never shells out to a Go formatter
pub fn config(source: Location, destination: Location) -> GenerationConfig {
    GenerationConfig::new(source, destination).with_formatter(FormatterChoice::Noop)
}
