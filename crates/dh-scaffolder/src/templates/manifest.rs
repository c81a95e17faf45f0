//! Generated project files: `package.json` and `menu.json`

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `package.json` of the generated project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub module_type: String,
    pub scripts: IndexMap<String, String>,
    pub private: bool,
    pub dev_dependencies: IndexMap<String, String>,
    pub dependencies: IndexMap<String, String>,
}

fn pairs(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl PackageManifest {
    /// Vite app pinned to the DataHarmonizer 1.3 release line.
    /// The package name is fixed; it does not follow the project name.
    pub fn data_harmonizer() -> Self {
        Self {
            name: "dh-testing-web".to_string(),
            version: "0.0.0".to_string(),
            module_type: "module".to_string(),
            scripts: pairs(&[
                ("dev", "vite"),
                ("build", "vite build"),
                ("preview", "vite preview"),
            ]),
            private: true,
            dev_dependencies: pairs(&[("vite", "3.0.4")]),
            dependencies: pairs(&[
                ("bootstrap", "4.3.1"),
                ("data-harmonizer", "1.3.5"),
                ("jquery", "3.5.1"),
                ("popper.js", "1.16.1"),
            ]),
        }
    }

    /// Script names, in manifest order
    pub fn script_names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }
}

/// Publication status of a menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStatus {
    Published,
    Draft,
}

/// A template offered in the DataHarmonizer menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub status: MenuStatus,
    pub display: bool,
}

impl MenuEntry {
    pub fn published(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: MenuStatus::Published,
            display: true,
        }
    }
}

/// `menu.json`: schema name -> class name -> entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu(pub IndexMap<String, IndexMap<String, MenuEntry>>);

impl Menu {
    /// One schema whose selected classes are all published and displayed
    pub fn from_selection(schema_name: &str, classes: &[String]) -> Self {
        let entries = classes
            .iter()
            .map(|class_name| (class_name.clone(), MenuEntry::published(class_name.as_str())))
            .collect();
        Self(IndexMap::from([(schema_name.to_string(), entries)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_manifest_json() {
        let manifest = serde_json::to_value(PackageManifest::data_harmonizer()).unwrap();
        assert_eq!(
            manifest,
            json!({
                "name": "dh-testing-web",
                "version": "0.0.0",
                "type": "module",
                "scripts": {
                    "dev": "vite",
                    "build": "vite build",
                    "preview": "vite preview"
                },
                "private": true,
                "devDependencies": { "vite": "3.0.4" },
                "dependencies": {
                    "bootstrap": "4.3.1",
                    "data-harmonizer": "1.3.5",
                    "jquery": "3.5.1",
                    "popper.js": "1.16.1"
                }
            })
        );
    }

    #[test]
    fn test_package_manifest_key_order() {
        let text = serde_json::to_string_pretty(&PackageManifest::data_harmonizer()).unwrap();
        let positions: Vec<usize> = [
            "\"name\"",
            "\"version\"",
            "\"type\"",
            "\"scripts\"",
            "\"private\"",
            "\"devDependencies\"",
            "\"dependencies\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            PackageManifest::data_harmonizer()
                .script_names()
                .collect::<Vec<_>>(),
            vec!["dev", "build", "preview"]
        );
    }

    #[test]
    fn test_menu_from_selection() {
        let menu = Menu::from_selection("example", &["B".to_string(), "A".to_string()]);
        let text = serde_json::to_string_pretty(&menu).unwrap();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&text).unwrap(),
            json!({
                "example": {
                    "B": { "name": "B", "status": "published", "display": true },
                    "A": { "name": "A", "status": "published", "display": true }
                }
            })
        );
        // Selection order is kept
        assert!(text.find("\"B\"").unwrap() < text.find("\"A\"").unwrap());
        // Two-space indentation
        assert!(text.starts_with("{\n  \"example\": {\n    \"B\": {"));
    }
}
