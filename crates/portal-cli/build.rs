//! Stamps `PORTAL_VERSION` with the package version plus git build metadata,
//! e.g. `0.1.0+g1a2b3c4` or `0.1.0+g1a2b3c4.dirty`.

use std::path::Path;
use std::process::Command;

fn main() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let git_dir = Path::new(manifest_dir).join("../../.git");
    for watched in ["HEAD", "index"] {
        println!("cargo:rerun-if-changed={}", git_dir.join(watched).display());
    }

    let mut version = env!("CARGO_PKG_VERSION").to_string();
    if let Some(commit) = git(&["rev-parse", "--short", "HEAD"]) {
        version.push_str("+g");
        version.push_str(&commit);
        if git(&["status", "--porcelain", "--untracked-files=no"]).is_some() {
            version.push_str(".dirty");
        }
    }

    println!("cargo:rustc-env=PORTAL_VERSION={version}");
}

/// Trimmed stdout of a successful git command, or `None` when git is missing,
/// fails or prints nothing.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .ok()
        .filter(|out| out.status.success())?;
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
