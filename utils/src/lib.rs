//! Shared utilities for the Seawatch project.
//!
//! This crate contains the small pieces shared between the viewer and the
//! log service, currently the build/version information.

pub mod version_info;
