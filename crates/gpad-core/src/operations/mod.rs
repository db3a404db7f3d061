pub mod file_operations;
pub mod packages;
pub mod patch_applicator;
pub mod preflight_checks;
pub mod repo_fetcher;

pub use patch_applicator::{apply_patch, verify_patch};
pub use preflight_checks::run_preflight_checks;
pub use repo_fetcher::{fetch_or_update, FetchOutcome};
