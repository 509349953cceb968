use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    // Package version plus the short commit hash when building from a checkout
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let app_version = match git_hash {
        Some(hash) if !hash.is_empty() => format!("{} ({})", pkg_version, hash),
        _ => pkg_version,
    };

    println!("cargo:rustc-env=APP_VERSION={}", app_version);

    // Re-run if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
