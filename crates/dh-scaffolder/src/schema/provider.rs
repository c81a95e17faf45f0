//! Capability interface over a schema library

use super::model::{SchemaDefinition, SlotDefinition};
use crate::error::SchemaError;
use std::future::Future;

/// What the scaffolder needs from a schema library
///
/// [`SchemaView`](super::SchemaView) is the bundled implementation; any other
/// schema library can be plugged in by implementing this trait.
pub trait SchemaProvider {
    /// Merge every imported schema into the root document
    fn merge_imports(&mut self) -> impl Future<Output = Result<(), SchemaError>> + Send;

    /// Class names in declaration order
    fn all_classes(&self) -> Vec<String>;

    /// The class itself followed by all of its ancestors, nearest first
    fn class_ancestors(&self, class_name: &str) -> Result<Vec<String>, SchemaError>;

    /// Own and inherited attribute definitions of a class, keyed by name
    fn class_induced_slots(&self, class_name: &str) -> Result<Vec<SlotDefinition>, SchemaError>;

    fn schema(&self) -> &SchemaDefinition;

    fn schema_mut(&mut self) -> &mut SchemaDefinition;
}
