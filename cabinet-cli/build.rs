//! Stamps the `cabinet` binary with where and when it was built.
//!
//! Sets `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` for `env!` in
//! main.rs. Outside a git checkout (e.g. a source tarball) the hash is
//! `"unknown"`.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// `git describe` of the checked-out commit, `-dirty` when the tree has edits
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let revision = String::from_utf8(output.stdout).ok()?;
    let revision = revision.trim();
    (!revision.is_empty()).then(|| revision.to_string())
}

fn build_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn stamp(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

fn main() {
    stamp(
        "GIT_HASH",
        &git_revision().unwrap_or_else(|| UNKNOWN.to_string()),
    );
    stamp("BUILD_TIMESTAMP", &build_timestamp());
    stamp(
        "BUILD_PROFILE",
        &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()),
    );

    // Re-stamp after a commit or checkout; other rebuilds keep the old stamp
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
