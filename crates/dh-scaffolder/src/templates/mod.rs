//! Project template and generated files
//!
//! This module provides:
//! - Template sources (bundled in the binary, or a local directory)
//! - Template copying with the `_gitignore` rename
//! - Generated file types (PackageManifest, Menu)

pub mod copier;
pub mod manifest;
pub mod source;

pub use copier::copy_template;
pub use manifest::{Menu, MenuEntry, MenuStatus, PackageManifest};
pub use source::{TemplateFile, TemplateSource};
