use crate::config::Config;
use crate::manifest::{self, MEDIAPIPE_DIR_NAME};
use crate::operations::{
    apply_patch, fetch_or_update, packages, run_preflight_checks, verify_patch, FetchOutcome,
};
use crate::types::{PatchPair, Stage};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Ambient inputs of a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionCtx {
    pub project_root: PathBuf,
    pub dry_run: bool,
}

impl ProvisionCtx {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            dry_run: false,
        }
    }
}

fn parent_of(project_root: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(project_root)
        .with_context(|| format!("Failed to resolve project root {:?}", project_root))?;
    canonical
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("project root {:?} has no parent directory", canonical))
}

/// The checkout the patch stage targets: the directory recorded by the
/// `mediapipe` stage when available, otherwise the sibling location the
/// original setup assumed.
pub fn mediapipe_root(ctx: &ProvisionCtx) -> Result<PathBuf> {
    if let Ok(config) = Config::load(&ctx.project_root) {
        if let Some(dir) = config.mediapipe_dir {
            return Ok(dir);
        }
    }
    log::debug!("no mediapipe_dir in config, assuming sibling checkout");
    Ok(parent_of(&ctx.project_root)?.join(MEDIAPIPE_DIR_NAME))
}

pub fn patch_pairs_for(ctx: &ProvisionCtx) -> Result<Vec<PatchPair>> {
    Ok(manifest::patch_pairs(
        &ctx.project_root,
        &mediapipe_root(ctx)?,
    ))
}

/// Runs the given stages strictly in order, halting on the first failure.
/// Nothing is retried and nothing is rolled back.
pub fn run_stages(stages: &[Stage], ctx: &ProvisionCtx) -> Result<()> {
    for stage in stages {
        println!("\n=== Stage: {} ===", stage);
        run_stage(*stage, ctx).with_context(|| format!("stage '{}' failed", stage))?;
    }
    Ok(())
}

fn run_stage(stage: Stage, ctx: &ProvisionCtx) -> Result<()> {
    match stage {
        Stage::Libs => packages::install_system_packages(),
        Stage::Pip => packages::install_python_packages(),
        Stage::Mediapipe => run_mediapipe_stage(ctx),
        Stage::Patch => run_patch_stage(ctx),
    }
}

fn run_mediapipe_stage(ctx: &ProvisionCtx) -> Result<()> {
    let parent = parent_of(&ctx.project_root)?;
    let outcome = fetch_or_update(&parent)?;

    let checkout = fs::canonicalize(parent.join(MEDIAPIPE_DIR_NAME))
        .context("Failed to resolve the MediaPipe checkout path")?;

    let mut config = Config::load(&ctx.project_root)?;
    config
        .set_mediapipe_dir(&checkout)
        .context("Refusing to record an invalid MediaPipe directory")?;
    config.save(&ctx.project_root)?;

    match outcome {
        FetchOutcome::Cloned => println!("MediaPipe cloned and recorded in config."),
        FetchOutcome::Updated => println!("MediaPipe checkout updated and recorded in config."),
    }
    Ok(())
}

fn run_patch_stage(ctx: &ProvisionCtx) -> Result<()> {
    let pairs = patch_pairs_for(ctx)?;

    match run_preflight_checks(&pairs) {
        Ok(_) => println!("\n--- Preflight Checks Passed. Proceeding with patching. ---"),
        Err(errors) => {
            println!("\n--- Preflight Checks Failed ---");
            for err in &errors {
                println!("{}", err);
            }
            println!("\nAborting. No files were modified.");
            return Err(anyhow!("{} preflight check(s) failed", errors.len()));
        }
    }

    let mut success_count = 0;
    let mut fail_count = 0;

    for pair in &pairs {
        match apply_patch(pair, ctx.dry_run) {
            Ok(msg) => {
                println!("{}", msg);
                success_count += 1;
            }
            Err(e) => {
                println!("    [ERROR] {:#}", e);
                fail_count += 1;
            }
        }
    }

    println!("\n--- Summary ---");
    println!("Total patches:        {}", pairs.len());
    println!("Successfully applied: {}", success_count);
    println!("Failed to apply:      {}", fail_count);

    if fail_count > 0 {
        return Err(anyhow!("{} patch(es) failed to apply", fail_count));
    }
    Ok(())
}

/// Audits the patched checkout: every destination must carry byte-for-byte
/// the content of its vendored source.
pub fn verify_patches(ctx: &ProvisionCtx) -> Result<()> {
    let pairs = patch_pairs_for(ctx)?;
    println!("--- Verifying patched files ---");

    let mut divergent = 0;
    for (i, pair) in pairs.iter().enumerate() {
        let prefix = format!("  - Patch #{} ({}):", i + 1, pair.label);
        match verify_patch(pair) {
            Ok(true) => println!("{} OK", prefix),
            Ok(false) => {
                println!("{} FAILED (Destination differs from vendored source)", prefix);
                divergent += 1;
            }
            Err(e) => {
                println!("{} FAILED ({:#})", prefix, e);
                divergent += 1;
            }
        }
    }

    if divergent > 0 {
        return Err(anyhow!("{} patched file(s) failed verification", divergent));
    }
    println!("All patched files verified.");
    Ok(())
}
