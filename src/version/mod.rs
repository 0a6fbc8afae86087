//! Version management for package releases.
//!
//! This module parses version specifiers and computes the target version of a
//! release from the manifest's current version.

mod bumper;

pub use bumper::{VersionBump, VersionSpecifier, compute_target_version, is_release_version};
