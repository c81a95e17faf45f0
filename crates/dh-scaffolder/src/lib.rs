//! DataHarmonizer scaffolder - shared library for the project scaffolding CLI
//!
//! Turns a LinkML schema into a ready-to-run DataHarmonizer web project.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - schema loading and flattening, class selection,
//!   template copying, package manager probing and installation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `project::materialize`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! Every step returns a [`ScaffoldError`] on failure; nothing in the library exits the
//! process. The binary decides how an error is reported.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use dh_scaffolder::{project, schema, select, templates};
//!
//! let view = schema::load_flattened("schema.yaml").await?;
//! let choices = select::class_choices(&view, "dh_interface")?;
//! let answers = select::SelectionAnswers::from_names("my-project", &["Sample".into()], &choices)?;
//! let manifest = templates::PackageManifest::data_harmonizer();
//! let plan = project::ProjectPlan {
//!     project_dir: "my-project".into(),
//!     template: &templates::TemplateSource::Bundled,
//!     manifest: &manifest,
//!     schema: view.schema(),
//!     schema_name: "schema",
//!     answers: &answers,
//! };
//! project::materialize(&plan).await?;
//! ```

pub mod error;
pub mod product;
pub mod project;
pub mod runtime;
pub mod schema;
pub mod select;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ScaffoldError, SchemaError};
pub use product::ProductConfig;
pub use runtime::{PackageManager, RuntimeInfo};
pub use schema::{SchemaProvider, SchemaView};
pub use select::{ClassChoice, SelectionAnswers};
pub use templates::{Menu, PackageManifest, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
