use clap::{Parser, Subcommand};
use gpad_core::config::Config;
use gpad_core::manifest::MEDIAPIPE_DIR_NAME;
use gpad_core::pipeline::{self, ProvisionCtx};
use gpad_core::types::Stage;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(author, version, about = "Provisions the GesturePad environment: system libraries, Python packages, a patched MediaPipe checkout.", long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Full provisioning run, stage by stage, halting on the first failure
    gpad all

    # Re-run only the patch stage, without touching any file
    gpad patch --dry-run

    # Check that the checkout still carries the vendored replacements
    gpad verify

    # Point the config at a GCP credentials file
    gpad config --credentials /home/me/gcp-key.json

STAGES:
    libs       install the native audio library (apt-get)
    pip        install the Python dependency set (pip3)
    mediapipe  clone or update the MediaPipe checkout next to the project
    patch      overwrite checkout files with the vendored replacements"#)]
struct Args {
    #[arg(
        long,
        global = true,
        help = "Path to the GesturePad project root [default: current directory]"
    )]
    project_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Install the native audio library via the system package manager
    Libs,

    /// Install the Python dependency set via pip3
    Pip,

    /// Clone or update the MediaPipe checkout and record it in the config
    Mediapipe,

    /// Replace checkout files with the vendored custom calculators and graphs
    Patch {
        #[arg(long, help = "Report what would change without touching any file")]
        dry_run: bool,
    },

    /// Run all four stages in order (the default)
    All,

    /// Check patched files are byte-identical to their vendored sources
    Verify,

    /// Update entries in data/config.json
    Config {
        #[arg(
            long,
            help = "Absolute path to the parent directory of the project and the MediaPipe checkout"
        )]
        parent_dir: Option<PathBuf>,

        #[arg(long, help = "Absolute path to the Google Cloud Platform credentials file")]
        credentials: Option<PathBuf>,
    },
}

fn run(args: Args) -> anyhow::Result<()> {
    let project_root = args
        .project_root
        .unwrap_or_else(|| PathBuf::from("."));
    let mut ctx = ProvisionCtx::new(project_root);
    log::debug!("project root: {:?}", ctx.project_root);

    match args.command.unwrap_or(Command::All) {
        Command::Libs => pipeline::run_stages(&[Stage::Libs], &ctx),
        Command::Pip => pipeline::run_stages(&[Stage::Pip], &ctx),
        Command::Mediapipe => pipeline::run_stages(&[Stage::Mediapipe], &ctx),
        Command::Patch { dry_run } => {
            ctx.dry_run = dry_run;
            pipeline::run_stages(&[Stage::Patch], &ctx)
        }
        Command::All => pipeline::run_stages(&Stage::all(), &ctx),
        Command::Verify => pipeline::verify_patches(&ctx),
        Command::Config {
            parent_dir,
            credentials,
        } => update_config(&ctx, parent_dir, credentials),
    }
}

fn update_config(
    ctx: &ProvisionCtx,
    parent_dir: Option<PathBuf>,
    credentials: Option<PathBuf>,
) -> anyhow::Result<()> {
    if parent_dir.is_none() && credentials.is_none() {
        anyhow::bail!("nothing to configure: pass --parent-dir and/or --credentials");
    }

    let mut config = Config::load(&ctx.project_root)?;

    if let Some(parent) = parent_dir {
        println!("Configuring MediaPipe installation directory...");
        config.set_mediapipe_dir(&parent.join(MEDIAPIPE_DIR_NAME))?;
        println!("Done.");
    }

    if let Some(creds) = credentials {
        println!("Configuring Google Cloud Platform credentials file...");
        config.set_credentials_path(&creds)?;
        println!("Done.");
    }

    config.save(&ctx.project_root)?;
    println!("Configuration complete.");
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
