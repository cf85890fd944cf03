//! Build automation tasks for Perspective Shift
//!
//! Usage:
//!   cargo xtask check-levels    # Validate every shipped level
//!   cargo xtask build-web       # Assemble dist/web from a wasm32 release build
//!
//! The web build plays the built-in level (no filesystem in the browser), so
//! dist/web only needs the page, the wasm binary and macroquad's JS loader.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "perspective-shift";
const WASM_TARGET: &str = "wasm32-unknown-unknown";
/// Loader matching the macroquad 0.4 dependency
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Perspective Shift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run `--check` on every level in assets/levels
    CheckLevels,
    /// Build the wasm binary and lay out dist/web
    BuildWeb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = project_root()?;

    match cli.command {
        Commands::CheckLevels => check_levels(&root),
        Commands::BuildWeb => build_web(&root),
    }
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn cargo(root: &Path) -> Command {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()));
    cmd.current_dir(root);
    cmd
}

/// Run a command, failing on a non-zero exit
fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().with_context(|| format!("failed to start {:?}", cmd.get_program()))?;
    if !status.success() {
        anyhow::bail!("{:?} exited with {}", cmd.get_program(), status);
    }
    Ok(())
}

/// Shipped level files, sorted by name
fn level_files(root: &Path) -> Result<Vec<PathBuf>> {
    let dir = root.join("assets/levels");
    let mut levels: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    levels.sort();
    Ok(levels)
}

/// Validate levels through the game's own loader, reporting every failure
fn check_levels(root: &Path) -> Result<()> {
    let levels = level_files(root)?;
    if levels.is_empty() {
        anyhow::bail!("no levels in assets/levels");
    }

    // Build once so the per-level runs don't each print compile output
    run(cargo(root).args(["build", "--quiet", "--bin", BINARY]))?;

    let failed: Vec<String> = levels
        .iter()
        .filter(|level| {
            run(cargo(root)
                .args(["run", "--quiet", "--bin", BINARY, "--", "--check"])
                .arg(level))
            .is_err()
        })
        .map(|level| level.display().to_string())
        .collect();

    if !failed.is_empty() {
        anyhow::bail!("{} of {} levels failed: {}", failed.len(), levels.len(), failed.join(", "));
    }
    println!("All {} levels OK", levels.len());
    Ok(())
}

fn build_web(root: &Path) -> Result<()> {
    run(cargo(root).args(["build", "--release", "--bin", BINARY, "--target", WASM_TARGET]))?;

    let dist = root.join("dist/web");
    fs::create_dir_all(&dist)?;

    let wasm = format!("{}.wasm", BINARY);
    let built = root.join("target").join(WASM_TARGET).join("release").join(&wasm);
    fs::copy(&built, dist.join(&wasm)).with_context(|| format!("copying {}", built.display()))?;
    fs::copy(root.join("web/index.html"), dist.join("index.html")).context("copying web/index.html")?;

    let loader = dist.join("mq_js_bundle.js");
    if !loader.exists() {
        run(Command::new("curl").args(["-sSfL", "-o"]).arg(&loader).arg(MQ_JS_BUNDLE))
            .context("fetching macroquad's JS bundle")?;
    }

    println!("dist/web ready: index.html, {}, mq_js_bundle.js", wasm);
    Ok(())
}
