// Build script to inject version information from git tags
//
// Falls back to CARGO_PKG_VERSION when git is unavailable or the build is
// outside a checkout.

use std::process::Command;

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=RISKBOARD_VERSION={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

/// "v0.3.0" -> "0.3.0", "v0.3.0-5-gabc123" -> "0.3.0", "abc123-dirty" -> "<pkg>-abc123-dirty"
fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();

    match described.strip_prefix('v') {
        Some(tagged) => Some(match tagged.find('-') {
            Some(dash) => tagged[..dash].to_string(),
            None => tagged.to_string(),
        }),
        None => Some(format!("{}-{}", env!("CARGO_PKG_VERSION"), described)),
    }
}
