use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a generated file into `output_dir`, creating the directory if it
/// does not exist. Returns the path written.
pub fn write_artifact(output_dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let path = output_dir.join(file_name);
    fs::write(&path, contents)
        .with_context(|| format!("writing generated file {}", path.display()))?;

    Ok(path)
}
