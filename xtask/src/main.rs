//! Workspace build tasks, invoked as `cargo run -p lumen-xtask -- <task>`.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Build tasks for the lumen workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the lumen-ui WASM bundle with trunk into crates/lumen-ui/dist.
    BuildUi {
        /// Build with optimizations.
        #[arg(long)]
        release: bool,
    },
    /// Remove the lumen-ui dist output.
    CleanUi,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.task {
        Task::BuildUi { release } => build_ui(release),
        Task::CleanUi => clean_ui(),
    }
}

fn ui_dir() -> &'static Path {
    Path::new("crates/lumen-ui")
}

fn build_ui(release: bool) -> Result<()> {
    let mut cmd = Command::new("trunk");
    cmd.arg("build").current_dir(ui_dir());
    if release {
        cmd.arg("--release");
    }
    let status = cmd
        .status()
        .context("failed to run trunk (is it installed? `cargo install trunk`)")?;
    if !status.success() {
        bail!("trunk build failed with {status}");
    }
    Ok(())
}

fn clean_ui() -> Result<()> {
    let dist = ui_dir().join("dist");
    if dist.exists() {
        std::fs::remove_dir_all(&dist)
            .with_context(|| format!("failed to remove {}", dist.display()))?;
    }
    Ok(())
}
