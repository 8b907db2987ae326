//! Stamps the binary version with the commit it was built from.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-env-changed=RADIUS_WATCH_VERSION");

    let package = env!("CARGO_PKG_VERSION");
    let version = match std::env::var("RADIUS_WATCH_VERSION") {
        Ok(pinned) if !pinned.trim().is_empty() => pinned,
        _ => match commit() {
            Some(sha) => format!("{} ({})", package, sha),
            None => package.to_string(),
        },
    };

    println!("cargo:rustc-env=RADIUS_WATCH_VERSION={}", version);
}

/// Short hash of HEAD, marked when the tree has local changes.
fn commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let sha = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if sha.is_empty() {
        return None;
    }

    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    Some(if dirty { format!("{}-dirty", sha) } else { sha })
}
