use crate::types::PatchPair;
use std::path::Path;

/// Native libraries installed through apt before the Python audio stack.
pub const SYSTEM_PACKAGES: &[&str] = &["portaudio19-dev"];

/// Python dependencies of the GesturePad application, installed in one
/// pip invocation.
pub const PYTHON_PACKAGES: &[&str] = &[
    "numpy",
    "opencv-python",
    "tensorflow",
    "sounddevice",
    "soundfile",
    "pydub",
    "imageio",
    "Pillow",
    "requests",
    "google-cloud-speech",
    "google-cloud-automl",
];

pub const MEDIAPIPE_REPO_URL: &str = "https://github.com/google/mediapipe.git";

/// Directory name the checkout gets as a sibling of the project root.
pub const MEDIAPIPE_DIR_NAME: &str = "mediapipe";

/// Where the vendored replacement files live, relative to the project root.
pub const VENDORED_DIR: &str = "data/mediapipe_custom";

// (vendored file name, destination relative to the MediaPipe checkout)
const PATCH_FILES: &[(&str, &str)] = &[
    (
        "end_loop_calculator.h",
        "mediapipe/calculators/core/end_loop_calculator.h",
    ),
    (
        "landmarks_to_render_data_calculator.cc",
        "mediapipe/calculators/util/landmarks_to_render_data_calculator.cc",
    ),
    (
        "multi_hand_tracking_desktop_live.pbtxt",
        "mediapipe/graphs/hand_tracking/multi_hand_tracking_desktop_live.pbtxt",
    ),
    (
        "multi_hand_renderer_cpu.pbtxt",
        "mediapipe/graphs/hand_tracking/subgraphs/multi_hand_renderer_cpu.pbtxt",
    ),
];

/// Resolves the fixed patch manifest against a project root and a MediaPipe
/// checkout root.
pub fn patch_pairs(project_root: &Path, mediapipe_root: &Path) -> Vec<PatchPair> {
    let vendored = project_root.join(VENDORED_DIR);
    PATCH_FILES
        .iter()
        .map(|&(name, dest)| PatchPair {
            label: name,
            source: vendored.join(name),
            dest: mediapipe_root.join(dest),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_patch_pairs_resolve_against_both_roots() {
        let pairs = patch_pairs(Path::new("/proj"), Path::new("/mp"));
        assert_eq!(pairs.len(), 4);
        assert_eq!(
            pairs[0].source,
            PathBuf::from("/proj/data/mediapipe_custom/end_loop_calculator.h")
        );
        assert_eq!(
            pairs[0].dest,
            PathBuf::from("/mp/mediapipe/calculators/core/end_loop_calculator.h")
        );
        for pair in &pairs {
            assert!(pair.source.starts_with("/proj/data/mediapipe_custom"));
            assert!(pair.dest.starts_with("/mp/mediapipe"));
        }
    }
}
