use crate::exec;
use crate::manifest::{MEDIAPIPE_DIR_NAME, MEDIAPIPE_REPO_URL};
use crate::types::StageError;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Cloned,
    Updated,
}

// A MediaPipe checkout is a git repository whose root carries the bazel
// WORKSPACE file.
fn is_mediapipe_checkout(dir: &Path) -> bool {
    dir.join(".git").exists() && dir.join("WORKSPACE").exists()
}

/// Clones MediaPipe into `<parent_dir>/mediapipe`, or fast-forwards an
/// existing checkout. Anything else occupying that path is a hard error,
/// never silently overwritten.
pub fn fetch_or_update(parent_dir: &Path) -> Result<FetchOutcome> {
    let checkout = parent_dir.join(MEDIAPIPE_DIR_NAME);

    let outcome = if !checkout.exists() {
        println!("--- Cloning MediaPipe into {:?} ---", checkout);
        let dest = checkout.to_string_lossy();
        exec::run("git", &["clone", MEDIAPIPE_REPO_URL, &dest], None)
            .context("MediaPipe clone failed")?;
        FetchOutcome::Cloned
    } else if is_mediapipe_checkout(&checkout) {
        println!("--- Updating existing MediaPipe checkout at {:?} ---", checkout);
        exec::run("git", &["pull", "--ff-only"], Some(&checkout))
            .context("MediaPipe update failed")?;
        FetchOutcome::Updated
    } else {
        return Err(StageError::ObstructedCheckout(checkout).into());
    };

    let head = exec::run_capture("git", &["rev-parse", "--short", "HEAD"], Some(&checkout))?;
    println!("MediaPipe checkout at commit {}", head.trim());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_obstructed_path_fails_without_touching_it() {
        let dir = tempdir().unwrap();
        let obstruction = dir.path().join(MEDIAPIPE_DIR_NAME);
        fs::create_dir(&obstruction).unwrap();
        fs::write(obstruction.join("unrelated.txt"), "keep me").unwrap();

        let err = fetch_or_update(dir.path()).unwrap_err();
        let stage_err = err.downcast_ref::<StageError>();
        assert!(matches!(stage_err, Some(StageError::ObstructedCheckout(_))));

        // The obstruction is left exactly as it was.
        assert_eq!(
            fs::read_to_string(obstruction.join("unrelated.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_checkout_detection_requires_workspace_file() {
        let dir = tempdir().unwrap();
        let checkout = dir.path().join(MEDIAPIPE_DIR_NAME);
        fs::create_dir_all(checkout.join(".git")).unwrap();
        assert!(!is_mediapipe_checkout(&checkout));

        fs::write(checkout.join("WORKSPACE"), "").unwrap();
        assert!(is_mediapipe_checkout(&checkout));
    }
}
