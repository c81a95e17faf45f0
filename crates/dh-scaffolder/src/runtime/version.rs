//! Version comparison for package manager compatibility

use semver::Version;

/// Compare an installed tool version against the oldest supported one
/// Returns a warning message if the installed tool is older
pub fn check_compatibility(tool: &str, installed: &str, minimum: &str) -> Option<String> {
    let installed_ver = parse_version(installed)?;
    let minimum_ver = parse_version(minimum)?;

    if installed_ver < minimum_ver {
        Some(format!(
            "{} {} is older than {}; installing dependencies may fail",
            tool, installed, minimum
        ))
    } else {
        None
    }
}

/// Parse version string, handling a leading 'v' and surrounding whitespace
pub fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}
