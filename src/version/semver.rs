//! Shared version parsing helpers

use semver::Version;

use crate::version::error::VersionError;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros, so
/// `"1.2"` and `"1.2.0"` parse to the same value. Anything semver rejects
/// after padding (non-numeric segments, four or more segments, leading
/// zeros) is an error.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).map_err(|_| VersionError::InvalidFormat(version.to_string()))
}
