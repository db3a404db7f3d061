use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn ensure_parent_exists(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    Ok(())
}

pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_exists(dst)?;
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;
    Ok(())
}

pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file: {:?}", path))
}

pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let left = fs::read(a).with_context(|| format!("Failed to read file: {:?}", a))?;
    let right = fs::read(b).with_context(|| format!("Failed to read file: {:?}", b))?;
    Ok(left == right)
}
