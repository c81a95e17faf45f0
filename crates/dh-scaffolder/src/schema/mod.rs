//! Schema loading and flattening
//!
//! This module provides:
//! - Schema document types (SchemaDefinition, ClassDefinition, SlotDefinition)
//! - The `SchemaProvider` capability trait
//! - `SchemaView`, a YAML implementation with import merging
//! - Flattening of induced attributes into each class

pub mod flatten;
pub mod model;
pub mod provider;
pub mod view;

pub use flatten::flatten;
pub use model::{ClassDefinition, SchemaDefinition, SlotDefinition};
pub use provider::SchemaProvider;
pub use view::SchemaView;

use crate::error::SchemaError;
use std::path::Path;

/// Load a schema, merge its imports and flatten every class
pub async fn load_flattened(path: impl AsRef<Path>) -> Result<SchemaView, SchemaError> {
    let mut view = SchemaView::load(path).await?;
    view.merge_imports().await?;
    flatten(&mut view)?;
    Ok(view)
}
