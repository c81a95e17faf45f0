//! Product configuration trait for CLI binaries
//!
//! This trait defines the constants a scaffolding product supplies: what the
//! generated project looks like, which class marks templates, and which
//! package manager installs it.

use crate::templates::PackageManifest;

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (display name, docs)
/// - The marker class whose descendants are pre-selected
/// - The generated `package.json`
/// - Package manager and environment overrides
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Interface class whose descendants are pre-checked; never offered itself
    fn marker_class(&self) -> &'static str;

    /// The `package.json` written into every generated project
    fn package_manifest(&self) -> PackageManifest;

    /// Package manager binary used when no override is set
    fn default_package_manager(&self) -> &'static str {
        "npm"
    }

    /// Environment variable overriding the package manager binary
    fn package_manager_env(&self) -> &'static str;

    /// Environment variable pointing at a local template directory
    fn template_dir_env(&self) -> &'static str;

    /// Oldest package manager version known to work; older ones get a warning
    fn min_package_manager_version(&self) -> Option<&'static str> {
        None
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Package manager binary, honoring the environment override
    fn package_manager(&self) -> String {
        std::env::var(self.package_manager_env())
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_package_manager().to_string())
    }
}
