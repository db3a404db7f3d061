use crate::operations::file_operations;
use crate::types::{PatchPair, StageError};
use anyhow::Result;

/// Replaces one checkout file with its vendored counterpart: the original
/// `rm` + `cp` pair. Preflight is expected to have run already.
pub fn apply_patch(pair: &PatchPair, dry_run: bool) -> Result<String> {
    println!("--- Applying patch: {}", pair.label);

    if !pair.source.exists() {
        return Err(StageError::MissingSource(pair.source.clone()).into());
    }
    if !pair.dest.exists() {
        return Err(StageError::MissingDestination(pair.dest.clone()).into());
    }

    if dry_run {
        return Ok(format!(
            "    [DRY RUN] {:?} would be replaced by {:?}",
            pair.dest, pair.source
        ));
    }

    file_operations::remove_file(&pair.dest)?;
    file_operations::copy_file(&pair.source, &pair.dest)?;
    Ok(format!("    [SUCCESS] {:?} replaced.", pair.dest))
}

/// True when the destination carries byte-for-byte the vendored content.
pub fn verify_patch(pair: &PatchPair) -> Result<bool> {
    file_operations::files_identical(&pair.source, &pair.dest)
}
