//! Flattening of induced attributes into class definitions

use super::provider::SchemaProvider;
use crate::error::SchemaError;
use indexmap::IndexMap;

/// Write every class's induced attributes into its `attributes` map
///
/// Induced slots are computed for all classes before any class is modified,
/// and attributes are keyed by name, so running this twice changes nothing.
pub fn flatten<P: SchemaProvider>(provider: &mut P) -> Result<(), SchemaError> {
    let induced = provider
        .all_classes()
        .into_iter()
        .map(|class_name| {
            let slots = provider.class_induced_slots(&class_name)?;
            Ok((class_name, slots))
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    let schema = provider.schema_mut();
    for (class_name, slots) in induced {
        if slots.is_empty() {
            continue;
        }
        let Some(class) = schema.classes.get_mut(&class_name) else {
            continue;
        };
        let attributes = class.attributes.get_or_insert_with(IndexMap::new);
        for slot in slots {
            let name = slot.name.clone().unwrap_or_default();
            attributes.insert(name, slot);
        }
    }

    Ok(())
}
