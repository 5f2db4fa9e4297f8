//! XTask - Build automation for Waqt
//!
//! Builds the browser widget's WASM package and publishes the crates.
//!
//! # Usage
//! ```sh
//! cargo xtask dist-web                # Build WASM for the widget (dist/web)
//! cargo xtask sync-versions           # Copy the workspace version into pkg/package.json
//! cargo xtask publish-crates -n       # Validate crates.io publish order
//! ```

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Publish order: dependencies first.
const WORKSPACE_CRATES: &[&str] = &["waqt-types", "waqt-schedule", "waqt-network", "waqt-core", "waqt"];

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let dry_run = args.iter().any(|a| a == "--dry-run" || a == "-n");

    match args[1].as_str() {
        "dist-web" => dist_web()?,
        "sync-versions" => sync_versions()?,
        "test-all" => test_all()?,
        "publish-crates" => publish_crates(dry_run)?,
        "-h" | "--help" | "help" => print_usage(),
        cmd => {
            eprintln!("❌ Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    println!(r#"
🕌 Waqt XTask - Build Automation

USAGE:
    cargo xtask <COMMAND> [OPTIONS]

COMMANDS:
    dist-web        Build the WASM widget package (web target)
                    Output: dist/web/

    sync-versions   Sync version from Cargo.toml to pkg/package.json

    test-all        Run workspace tests with and without the async feature

    publish-crates  Publish all crates to crates.io in dependency order

OPTIONS:
    --dry-run, -n   Validate without actually publishing
"#);
}

// =============================================================================
// Helper Functions
// =============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let root = PathBuf::from(manifest_dir)
        .parent()
        .context("Failed to find project root")?
        .to_path_buf();
    Ok(root)
}

fn run_cmd(cmd: &str, args: &[&str]) -> Result<()> {
    run_cmd_in_dir(&project_root()?, cmd, args)
}

fn run_cmd_in_dir(dir: &Path, cmd: &str, args: &[&str]) -> Result<()> {
    println!("  → [{}] {} {}", dir.display(), cmd, args.join(" "));

    let status = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to start: {} {}", cmd, args.join(" ")))?;

    if !status.success() {
        bail!("Command '{}' failed with exit code: {:?}", cmd, status.code());
    }
    Ok(())
}

fn command_exists(cmd: &str) -> bool {
    let finder = if cfg!(windows) { "where" } else { "which" };
    Command::new(finder)
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn read_cargo_version() -> Result<String> {
    let content = fs::read_to_string(project_root()?.join("Cargo.toml"))?;
    parse_workspace_version(&content).context("Could not find version in Cargo.toml")
}

/// First `version = "..."` under `[workspace.package]`.
fn parse_workspace_version(manifest: &str) -> Option<String> {
    let mut in_package = false;
    for line in manifest.lines().map(str::trim) {
        if line.starts_with('[') {
            in_package = line == "[workspace.package]";
            continue;
        }
        if in_package && line.starts_with("version") && line.contains('=') {
            return line.split('"').nth(1).map(str::to_string);
        }
    }
    None
}

fn replace_json_version(content: &str, version: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim().starts_with("\"version\"") {
                let indent = &line[..line.len() - line.trim_start().len()];
                let comma = if line.trim_end().ends_with(',') { "," } else { "" };
                format!("{}\"version\": \"{}\"{}", indent, version, comma)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Task: sync-versions
// =============================================================================

fn sync_versions() -> Result<()> {
    let version = read_cargo_version()?;
    let pkg_json = project_root()?.join("pkg").join("package.json");

    println!("🔄 Syncing version {}...", version);

    if !pkg_json.exists() {
        println!("  ⏭️  pkg/package.json not found, run dist-web first");
        return Ok(());
    }

    let content = fs::read_to_string(&pkg_json)?;
    fs::write(&pkg_json, replace_json_version(&content, &version))?;
    println!("  ✅ Updated pkg/package.json");
    Ok(())
}

// =============================================================================
// Task: dist-web
// =============================================================================

fn dist_web() -> Result<()> {
    println!("\n🕸️  Building WASM package for the prayer widget...\n");

    let root = project_root()?;
    let wasm_dir = root.join("bindings").join("waqt_wasm");
    let dist_web = root.join("dist").join("web");

    if !command_exists("wasm-pack") {
        println!("  ⚠️ wasm-pack not found. Installing...");
        run_cmd("cargo", &["install", "wasm-pack"])?;
    }

    run_cmd_in_dir(&wasm_dir, "wasm-pack", &[
        "build",
        "--target", "web",
        "--out-dir", dist_web.to_string_lossy().as_ref(),
        "--out-name", "waqt",
    ])?;

    println!("\n✅ WASM build complete: dist/web/");
    Ok(())
}

// =============================================================================
// Task: test-all
// =============================================================================

fn test_all() -> Result<()> {
    println!("\n🧪 Running tests...\n");
    run_cmd("cargo", &["test", "--workspace", "--exclude", "waqt-wasm"])?;
    run_cmd("cargo", &["test", "-p", "waqt", "--features", "async"])?;
    println!("\n✅ All tests passed!");
    Ok(())
}

// =============================================================================
// Task: publish-crates
// =============================================================================

fn publish_crates(dry_run: bool) -> Result<()> {
    println!("\n📦 Publishing crates to crates.io...\n");

    let root = project_root()?;

    for crate_name in WORKSPACE_CRATES {
        println!("  📦 Publishing {}...", crate_name);

        // Directory names use underscores for the core crate only.
        let crate_dir = if *crate_name == "waqt-core" {
            root.join("crates").join("waqt_core")
        } else {
            root.join("crates").join(crate_name)
        };

        let mut args = vec!["publish"];
        if dry_run {
            args.push("--dry-run");
        }

        let output = Command::new("cargo")
            .args(&args)
            .current_dir(&crate_dir)
            .output()
            .with_context(|| format!("Failed to run cargo publish for {}", crate_name))?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            println!("  ✅ {} published!", crate_name);
        } else if stderr.contains("already exists") {
            println!("  ⏭️  {} already published, skipping...", crate_name);
            continue;
        } else {
            eprintln!("{}", String::from_utf8_lossy(&output.stdout));
            eprintln!("{}", stderr);
            bail!("Failed to publish {}", crate_name);
        }

        if !dry_run {
            println!("  ⏳ Waiting 30s for crates.io index update...");
            std::thread::sleep(std::time::Duration::from_secs(30));
        }
    }

    if dry_run {
        println!("\n✅ All crates validated!");
    } else {
        println!("\n✅ All crates published to crates.io!");
    }

    Ok(())
}
