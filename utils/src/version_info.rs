//! Version information for the application, populated at build time.
//!
//! Environment display format:
//! - Prod (stable): `stable:{version}`
//! - Local/Test: `main:{commit}`
//!
//! This module supports both compile-time feature-based environment detection
//! (for the viewer binary) and runtime environment detection (for the
//! service, which reads its environment from configuration).

/// Runtime environment enum for the service, which determines its
/// environment at runtime rather than compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Local development
    Local,
    /// Production
    Prod,
    /// Test environment
    Test,
}

/// Get the build date in RFC3339 format
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Get the git commit hash (short)
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

/// Get the package version
pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the environment label and version/info string based on build features.
///
/// Format: `(env_name, info_string)`
/// - Prod: ("stable", "version")
/// - Test: ("main", "commit")
/// - Local (default): ("main", "commit")
pub fn env_version_info() -> (&'static str, &'static str) {
    if cfg!(feature = "prod") {
        ("stable", build_version())
    } else {
        ("main", build_commit())
    }
}

/// Format the environment and version info as a display string.
pub fn format_env_version() -> String {
    let (env_name, info) = env_version_info();
    format!("{env_name}:{info}")
}

/// Format version string for a runtime-determined environment.
///
/// This is used by the service, which determines its environment at runtime
/// rather than compile time. Uses build-time constants for commit/version.
///
/// Format: `{env}:{info}` where:
/// - Test/Local: `main:{commit}`
/// - Prod: `stable:{version}`
pub fn format_version_for_runtime_env(env: RuntimeEnv) -> String {
    match env {
        RuntimeEnv::Test | RuntimeEnv::Local => format!("main:{}", build_commit()),
        RuntimeEnv::Prod => format!("stable:{}", build_version()),
    }
}
