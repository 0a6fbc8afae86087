//! Version specifier parsing and target version computation.

use crate::error::{Result, VersionError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)$")
        .unwrap_or_else(|e| panic!("invalid version pattern: {e}"))
});

/// Symbolic version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    /// `X+1.0.0`
    Major,
    /// `M.X+1.0`
    Minor,
    /// `M.m.X+1`
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        })
    }
}

/// What the user asked the release to move to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpecifier {
    /// A literal `MAJOR.MINOR.PATCH`, used verbatim
    Exact(String),
    /// Increment one component of the current version
    Bump(VersionBump),
}

impl FromStr for VersionSpecifier {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if is_release_version(s) {
            return Ok(VersionSpecifier::Exact(s.to_string()));
        }
        match s {
            "major" => Ok(VersionSpecifier::Bump(VersionBump::Major)),
            "minor" => Ok(VersionSpecifier::Bump(VersionBump::Minor)),
            "patch" => Ok(VersionSpecifier::Bump(VersionBump::Patch)),
            _ => Err(VersionError::InvalidSpecifier {
                specifier: Some(s.to_string()),
            }),
        }
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpecifier::Exact(v) => f.write_str(v),
            VersionSpecifier::Bump(b) => b.fmt(f),
        }
    }
}

/// True when `version` is a plain `MAJOR.MINOR.PATCH`
pub fn is_release_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// Compute the version a release moves `current` to.
///
/// A literal specifier wins without any ordering check. A bump increments
/// one component and zeroes the lower ones; higher components keep their
/// literal digits.
pub fn compute_target_version(current: &str, specifier: Option<&str>) -> Result<String> {
    let specifier: VersionSpecifier = specifier
        .filter(|s| !s.is_empty())
        .ok_or(VersionError::InvalidSpecifier { specifier: None })?
        .parse()?;

    let caps = VERSION_PATTERN
        .captures(current)
        .ok_or_else(|| VersionError::InvalidVersion {
            version: current.to_string(),
        })?;
    let (major, minor, patch) = (&caps[1], &caps[2], &caps[3]);

    let target = match specifier {
        VersionSpecifier::Exact(version) => {
            warn_if_lower(current, &version);
            version
        }
        VersionSpecifier::Bump(VersionBump::Major) => {
            format!("{}.0.0", increment(current, major)?)
        }
        VersionSpecifier::Bump(VersionBump::Minor) => {
            format!("{major}.{}.0", increment(current, minor)?)
        }
        VersionSpecifier::Bump(VersionBump::Patch) => {
            format!("{major}.{minor}.{}", increment(current, patch)?)
        }
    };

    if target == current {
        return Err(VersionError::NoOp {
            version: current.to_string(),
        }
        .into());
    }

    Ok(target)
}

/// `component + 1`; overflow reports the whole `current` version
fn increment(current: &str, component: &str) -> Result<u64> {
    component
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| {
            VersionError::InvalidVersion {
                version: current.to_string(),
            }
            .into()
        })
}

fn warn_if_lower(current: &str, target: &str) {
    if let (Ok(current), Ok(target)) = (
        semver::Version::parse(current),
        semver::Version::parse(target),
    ) && target < current
    {
        log::warn!("Target version {target} is lower than current version {current}");
    }
}
