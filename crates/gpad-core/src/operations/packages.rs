use crate::exec;
use crate::manifest::{PYTHON_PACKAGES, SYSTEM_PACKAGES};
use anyhow::Result;

/// Installs the native audio library the Python audio stack links against.
pub fn install_system_packages() -> Result<()> {
    println!("--- Installing system packages ---");
    let mut args = vec!["apt-get", "install", "-y"];
    args.extend_from_slice(SYSTEM_PACKAGES);
    exec::run("sudo", &args, None)
}

/// Installs the application's Python dependencies in a single pip
/// invocation, as the original setup did.
pub fn install_python_packages() -> Result<()> {
    println!("--- Installing Python packages ---");
    let mut args = vec!["install", "--user"];
    args.extend_from_slice(PYTHON_PACKAGES);
    exec::run("pip3", &args, None)
}
