//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Tool detection via `--version` probes
//! - Version advisories for outdated package managers
//! - The `PackageManager` that installs a generated project

pub mod check;
pub mod tool;
pub mod version;

pub use check::{check_tool, RuntimeInfo};
pub use tool::PackageManager;
pub use version::check_compatibility;
