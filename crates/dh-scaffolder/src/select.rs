//! Class selection: which classes become DataHarmonizer templates

use crate::error::{ScaffoldError, SchemaError};
use crate::schema::SchemaProvider;

/// A class offered to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChoice {
    pub name: String,
    /// Pre-selected because the class descends from the marker class
    pub checked: bool,
}

/// Every class except the marker, pre-checked when the marker is one of its ancestors
pub fn class_choices<P: SchemaProvider>(
    provider: &P,
    marker_class: &str,
) -> Result<Vec<ClassChoice>, SchemaError> {
    provider
        .all_classes()
        .into_iter()
        .filter(|name| name != marker_class)
        .map(|name| {
            let checked = provider
                .class_ancestors(&name)?
                .iter()
                .any(|ancestor| ancestor == marker_class);
            Ok(ClassChoice { name, checked })
        })
        .collect()
}

/// Answers collected from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAnswers {
    project_name: String,
    classes: Vec<String>,
}

impl SelectionAnswers {
    /// Validate answers: the project name and the class list must not be empty
    pub fn new(project_name: impl Into<String>, classes: Vec<String>) -> Result<Self, ScaffoldError> {
        let project_name = project_name.into().trim().to_string();
        if project_name.is_empty() {
            return Err(ScaffoldError::EmptyProjectName);
        }
        if classes.is_empty() {
            return Err(ScaffoldError::NoClassesSelected);
        }
        Ok(Self {
            project_name,
            classes,
        })
    }

    /// Validate classes given up front (e.g. `--classes`) against the offered choices.
    /// Blank names are dropped and duplicates keep their first position.
    pub fn from_names(
        project_name: impl Into<String>,
        requested: &[String],
        choices: &[ClassChoice],
    ) -> Result<Self, ScaffoldError> {
        let mut classes: Vec<String> = Vec::new();
        for name in requested.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if !choices.iter().any(|choice| choice.name == name) {
                let available = choices
                    .iter()
                    .map(|choice| choice.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ScaffoldError::UnknownClass(name.to_string(), available));
            }
            if !classes.iter().any(|c| c == name) {
                classes.push(name.to_string());
            }
        }
        Self::new(project_name, classes)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Selected classes in selection order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
