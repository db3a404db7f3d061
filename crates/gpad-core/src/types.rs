use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One stage of the provisioning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Libs,
    Pip,
    Mediapipe,
    Patch,
}

impl Stage {
    pub fn all() -> [Stage; 4] {
        [Stage::Libs, Stage::Pip, Stage::Mediapipe, Stage::Patch]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Libs => "libs",
            Stage::Pip => "pip",
            Stage::Mediapipe => "mediapipe",
            Stage::Patch => "patch",
        };
        write!(f, "{}", name)
    }
}

/// A vendored replacement file and the checkout path it overwrites.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchPair {
    pub label: &'static str,
    pub source: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("required tool '{0}' was not found in PATH")]
    ToolNotFound(String),

    #[error("command `{command}` failed ({status})")]
    CommandFailed { command: String, status: String },

    #[error("{0:?} exists but is not a MediaPipe git checkout (expected .git and a WORKSPACE file); move it aside or point the tool elsewhere")]
    ObstructedCheckout(PathBuf),

    #[error("patch destination not found: {0:?}")]
    MissingDestination(PathBuf),

    #[error("vendored patch source not found: {0:?}")]
    MissingSource(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_matches_makefile_targets() {
        let names: Vec<String> = Stage::all().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["libs", "pip", "mediapipe", "patch"]);
    }
}
