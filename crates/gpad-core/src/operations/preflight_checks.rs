use crate::types::PatchPair;
use std::fs;

/// Checks the whole manifest before anything is mutated. Every destination
/// must already exist inside the checkout and every vendored source must be
/// present; all violations are collected so the operator sees them at once.
pub fn run_preflight_checks(pairs: &[PatchPair]) -> Result<(), Vec<String>> {
    println!("--- Running Preflight Checks ---");
    let mut errors = Vec::new();

    for (i, pair) in pairs.iter().enumerate() {
        let prefix = format!("  - Patch #{} ({}):", i + 1, pair.label);

        if !pair.source.exists() {
            errors.push(format!(
                "{} FAILED (Vendored source {:?} not found)",
                prefix, pair.source
            ));
            continue;
        }

        if !pair.dest.exists() {
            errors.push(format!(
                "{} FAILED (Destination {:?} not found in checkout)",
                prefix, pair.dest
            ));
            continue;
        }

        if let Ok(metadata) = fs::metadata(&pair.dest) {
            if metadata.permissions().readonly() {
                errors.push(format!("{} FAILED (Destination is read-only)", prefix));
                continue;
            }
        }

        println!("{} OK", prefix);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pair(label: &'static str, source: std::path::PathBuf, dest: std::path::PathBuf) -> PatchPair {
        PatchPair {
            label,
            source,
            dest,
        }
    }

    #[test]
    fn test_preflight_success() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("replacement.h");
        let dest = dir.path().join("original.h");
        fs::write(&source, "new").unwrap();
        fs::write(&dest, "old").unwrap();

        let result = run_preflight_checks(&[pair("replacement.h", source, dest)]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_preflight_missing_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("replacement.h");
        fs::write(&source, "new").unwrap();

        let result =
            run_preflight_checks(&[pair("replacement.h", source, dir.path().join("absent.h"))]);
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("not found in checkout"));
    }

    #[test]
    fn test_preflight_missing_source() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("original.h");
        fs::write(&dest, "old").unwrap();

        let result =
            run_preflight_checks(&[pair("replacement.h", dir.path().join("absent.h"), dest)]);
        let errors = result.unwrap_err();
        assert!(errors[0].contains("Vendored source"));
    }

    #[test]
    fn test_preflight_collects_all_violations() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ok_source.h");
        fs::write(&source, "new").unwrap();

        let pairs = vec![
            pair("first.h", dir.path().join("no_source.h"), dir.path().join("a.h")),
            pair("second.h", source, dir.path().join("no_dest.h")),
        ];

        let errors = run_preflight_checks(&pairs).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
