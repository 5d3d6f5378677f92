// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=FILL_LIGHT_VERSION");

    // Packagers (flatpak, distro builds) pin the version explicitly
    let version = std::env::var("FILL_LIGHT_VERSION")
        .ok()
        .or_else(describe_head)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version derived from the nearest `v*` tag.
///
/// - exactly on `v0.1.0` -> `0.1.0`
/// - five commits after it -> `0.1.0+5.abcdef1`
/// - no tags at all -> the short commit hash
fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let described = described.strip_prefix('v').unwrap_or(&described);

    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if let [hash, commits, base] = parts.as_slice() {
        let hash = hash.strip_prefix('g').unwrap_or(hash);
        Some(format!("{}+{}.{}", base, commits, hash))
    } else {
        Some(described.to_string())
    }
}
