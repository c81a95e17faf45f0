//! YAML schema view with import merging and inheritance resolution

use super::model::{ClassDefinition, SchemaDefinition, SlotDefinition};
use super::provider::SchemaProvider;
use crate::error::SchemaError;
use indexmap::map::Entry;
use indexmap::IndexSet;
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// Top-level maps that are merged entry by entry when a schema is imported
const MERGED_SECTIONS: &[&str] = &["prefixes", "types", "enums", "subsets"];

/// Imports with this prefix name the LinkML metamodel and are never loaded
const METAMODEL_PREFIX: &str = "linkml:";

/// Where an imported schema lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ImportLocation {
    File(PathBuf),
    Remote(Url),
}

impl ImportLocation {
    fn display(&self) -> String {
        match self {
            ImportLocation::File(path) => path.display().to_string(),
            ImportLocation::Remote(url) => url.to_string(),
        }
    }

    /// Resolve an `imports` entry relative to the schema that declares it.
    /// Returns `None` for metamodel imports.
    fn resolve(&self, import: &str) -> Result<Option<ImportLocation>, SchemaError> {
        if import.starts_with(METAMODEL_PREFIX) {
            return Ok(None);
        }

        let invalid = || SchemaError::InvalidImport {
            import: import.to_string(),
            origin: self.display(),
        };

        if import.contains("://") {
            let url = Url::parse(import).map_err(|_| invalid())?;
            return match url.scheme() {
                "http" | "https" => Ok(Some(ImportLocation::Remote(url))),
                _ => Err(invalid()),
            };
        }

        let file_name = if Path::new(import).extension().is_some() {
            import.to_string()
        } else {
            format!("{}.yaml", import)
        };

        match self {
            ImportLocation::File(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                Ok(Some(ImportLocation::File(base.join(file_name))))
            }
            ImportLocation::Remote(url) => {
                let joined = url.join(&file_name).map_err(|_| invalid())?;
                Ok(Some(ImportLocation::Remote(joined)))
            }
        }
    }
}

/// In-memory view over a schema document
pub struct SchemaView {
    schema: SchemaDefinition,
    source: PathBuf,
    client: reqwest::Client,
}

impl SchemaView {
    /// Load a schema file. Imports are not merged until
    /// [`merge_imports`](SchemaProvider::merge_imports) is called.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let source = std::path::absolute(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = read_file(&source).await?;
        Ok(Self::new(schema, source))
    }

    /// Wrap an already parsed schema; `source` anchors relative imports
    pub fn new(mut schema: SchemaDefinition, source: PathBuf) -> Self {
        fill_names(&mut schema);
        Self {
            schema,
            source,
            client: reqwest::Client::builder()
                .user_agent(concat!("dh-scaffolder/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Absolute path of the loaded schema file
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Use `client` for remote imports
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn class(&self, class_name: &str) -> Result<&ClassDefinition, SchemaError> {
        self.schema
            .classes
            .get(class_name)
            .ok_or_else(|| SchemaError::UnknownClass(class_name.to_string()))
    }

    async fn fetch(&self, location: &ImportLocation) -> Result<SchemaDefinition, SchemaError> {
        match location {
            ImportLocation::File(path) => read_file(path).await,
            ImportLocation::Remote(url) => {
                let fetch_error = |source| SchemaError::Fetch {
                    url: url.to_string(),
                    source,
                };
                let content = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(fetch_error)?
                    .text()
                    .await
                    .map_err(fetch_error)?;
                parse(&content, url.as_str())
            }
        }
    }
}

impl SchemaProvider for SchemaView {
    async fn merge_imports(&mut self) -> Result<(), SchemaError> {
        let root = ImportLocation::File(self.source.clone());
        let mut seen: HashSet<ImportLocation> = HashSet::from([root.clone()]);
        let mut pending: VecDeque<ImportLocation> = VecDeque::new();

        for import in &self.schema.imports {
            pending.extend(root.resolve(import)?);
        }

        while let Some(location) = pending.pop_front() {
            if !seen.insert(location.clone()) {
                continue;
            }

            let mut imported = self.fetch(&location).await?;
            fill_names(&mut imported);
            for import in &imported.imports {
                pending.extend(location.resolve(import)?);
            }
            merge_into(&mut self.schema, imported);
        }

        Ok(())
    }

    fn all_classes(&self) -> Vec<String> {
        self.schema.classes.keys().cloned().collect()
    }

    /// Breadth-first over `is_a` then `mixins`; the class itself comes first.
    fn class_ancestors(&self, class_name: &str) -> Result<Vec<String>, SchemaError> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([class_name.to_string()]);

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let class = self.class(&name)?;
            queue.extend(class.is_a.iter().cloned());
            queue.extend(class.mixins.iter().cloned());
            ancestors.push(name);
        }

        Ok(ancestors)
    }

    fn class_induced_slots(&self, class_name: &str) -> Result<Vec<SlotDefinition>, SchemaError> {
        let ancestors = self.class_ancestors(class_name)?;
        let lineage = ancestors
            .iter()
            .map(|name| self.class(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut slot_names: IndexSet<&str> = IndexSet::new();
        for class in &lineage {
            slot_names.extend(class.slots.iter().map(String::as_str));
            if let Some(attributes) = &class.attributes {
                slot_names.extend(attributes.keys().map(String::as_str));
            }
        }

        let induced = slot_names
            .into_iter()
            .map(|slot_name| {
                let mut slot = self
                    .schema
                    .slots
                    .get(slot_name)
                    .cloned()
                    .unwrap_or_default();

                // Farthest ancestor first so nearer definitions win
                for class in lineage.iter().rev() {
                    if let Some(attribute) = class
                        .attributes
                        .as_ref()
                        .and_then(|attributes| attributes.get(slot_name))
                    {
                        slot.overlay(attribute);
                    }
                    if let Some(usage) = class.slot_usage.get(slot_name) {
                        slot.overlay(usage);
                    }
                }

                slot.name = Some(slot_name.to_string());
                slot
            })
            .collect();

        Ok(induced)
    }

    fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    fn schema_mut(&mut self) -> &mut SchemaDefinition {
        &mut self.schema
    }
}

async fn read_file(path: &Path) -> Result<SchemaDefinition, SchemaError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse(&content, &path.display().to_string())
}

fn parse(content: &str, origin: &str) -> Result<SchemaDefinition, SchemaError> {
    serde_yaml::from_str(content).map_err(|source| SchemaError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Element names default to their keys
fn fill_names(schema: &mut SchemaDefinition) {
    for (name, class) in schema.classes.iter_mut() {
        class.name.get_or_insert_with(|| name.clone());
        if let Some(attributes) = class.attributes.as_mut() {
            for (attribute_name, attribute) in attributes.iter_mut() {
                attribute.name.get_or_insert_with(|| attribute_name.clone());
            }
        }
    }
    for (name, slot) in schema.slots.iter_mut() {
        slot.name.get_or_insert_with(|| name.clone());
    }
}

/// Elements already defined by the importing schema are kept
fn merge_into(target: &mut SchemaDefinition, imported: SchemaDefinition) {
    for (name, class) in imported.classes {
        target.classes.entry(name).or_insert(class);
    }
    for (name, slot) in imported.slots {
        target.slots.entry(name).or_insert(slot);
    }
    for (key, value) in imported.extra {
        if !MERGED_SECTIONS.contains(&key.as_str()) {
            continue;
        }
        match target.extra.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(mut entry) => {
                if let (Value::Object(existing), Value::Object(incoming)) = (entry.get_mut(), value)
                {
                    for (name, element) in incoming {
                        existing.entry(name).or_insert(element);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).unwrap();
        path
    }

    const ROOT: &str = r#"
id: https://example.org/root
name: root
imports:
  - linkml:types
  - common
prefixes:
  root: https://example.org/root/
slots:
  sample_id:
    identifier: true
    range: string
classes:
  dh_interface:
    description: Marker for DataHarmonizer templates
  Sample:
    is_a: Entity
    mixins:
      - dh_interface
    slots:
      - sample_id
    slot_usage:
      label:
        required: true
    attributes:
      depth:
        range: float
"#;

    const COMMON: &str = r#"
id: https://example.org/common
name: common
imports:
  - root.yaml
prefixes:
  common: https://example.org/common/
types:
  label_string:
    typeof: string
classes:
  Entity:
    attributes:
      label:
        range: label_string
      depth:
        range: integer
        unit: m
  Sample:
    description: should not replace the root definition
"#;

    async fn load_merged(dir: &TempDir) -> SchemaView {
        write(dir, "common.yaml", COMMON);
        let root = write(dir, "root.yaml", ROOT);
        let mut view = SchemaView::load(&root).await.unwrap();
        view.merge_imports().await.unwrap();
        view
    }

    #[tokio::test]
    async fn test_merge_imports_adds_imported_elements() {
        let dir = TempDir::new().unwrap();
        let view = load_merged(&dir).await;

        assert_eq!(view.all_classes(), vec!["dh_interface", "Sample", "Entity"]);
        assert!(view.schema().extra["types"]
            .as_object()
            .unwrap()
            .contains_key("label_string"));

        let prefixes = view.schema().extra["prefixes"].as_object().unwrap();
        assert!(prefixes.contains_key("root"));
        assert!(prefixes.contains_key("common"));
    }

    #[tokio::test]
    async fn test_merge_imports_keeps_local_definitions() {
        let dir = TempDir::new().unwrap();
        let view = load_merged(&dir).await;

        let sample = &view.schema().classes["Sample"];
        assert_eq!(sample.is_a.as_deref(), Some("Entity"));
        assert!(!sample.extra.contains_key("description"));
        assert_eq!(view.schema().name, "root");
    }

    #[tokio::test]
    async fn test_missing_import_is_an_error() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "root.yaml", "name: root\nimports:\n  - missing\n");
        let mut view = SchemaView::load(&root).await.unwrap();

        let err = view.merge_imports().await.unwrap_err();
        assert!(matches!(err, SchemaError::Read { ref path, .. } if path.ends_with("missing.yaml")));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SchemaView::load(dir.path().join("nope.yaml")).await.err().unwrap();
        assert!(matches!(err, SchemaError::Read { .. }));
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.yaml", "classes: [unclosed");
        let err = SchemaView::load(&path).await.err().unwrap();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_class_ancestors_nearest_first() {
        let dir = TempDir::new().unwrap();
        let view = load_merged(&dir).await;

        assert_eq!(
            view.class_ancestors("Sample").unwrap(),
            vec!["Sample", "Entity", "dh_interface"]
        );
        assert_eq!(view.class_ancestors("Entity").unwrap(), vec!["Entity"]);
    }

    #[test]
    fn test_unknown_parent_is_an_error() {
        let schema: SchemaDefinition =
            serde_yaml::from_str("name: s\nclasses:\n  Child:\n    is_a: Ghost\n").unwrap();
        let view = SchemaView::new(schema, PathBuf::from("/tmp/s.yaml"));

        let err = view.class_ancestors("Child").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownClass(ref name) if name == "Ghost"));
    }

    #[test]
    fn test_inheritance_cycle_terminates() {
        let schema: SchemaDefinition = serde_yaml::from_str(
            "name: s\nclasses:\n  A:\n    is_a: B\n  B:\n    is_a: A\n",
        )
        .unwrap();
        let view = SchemaView::new(schema, PathBuf::from("/tmp/s.yaml"));

        assert_eq!(view.class_ancestors("A").unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_induced_slots_combine_lineage() {
        let dir = TempDir::new().unwrap();
        let view = load_merged(&dir).await;

        let induced = view.class_induced_slots("Sample").unwrap();
        let names: Vec<_> = induced.iter().map(|s| s.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["sample_id", "depth", "label"]);

        let sample_id = &induced[0];
        assert_eq!(sample_id.properties["identifier"], true);

        // Own attribute overrides the ancestor's, unset keys are inherited
        let depth = &induced[1];
        assert_eq!(depth.properties["range"], "float");
        assert_eq!(depth.properties["unit"], "m");

        // slot_usage refines the inherited attribute
        let label = &induced[2];
        assert_eq!(label.properties["range"], "label_string");
        assert_eq!(label.properties["required"], true);
    }

    #[test]
    fn test_resolve_relative_file_import() {
        let base = ImportLocation::File(PathBuf::from("/schemas/root.yaml"));
        assert_eq!(
            base.resolve("shared/core").unwrap(),
            Some(ImportLocation::File(PathBuf::from("/schemas/shared/core.yaml")))
        );
        assert_eq!(
            base.resolve("core.yml").unwrap(),
            Some(ImportLocation::File(PathBuf::from("/schemas/core.yml")))
        );
        assert_eq!(base.resolve("linkml:types").unwrap(), None);
    }

    #[test]
    fn test_resolve_remote_imports() {
        let base = ImportLocation::File(PathBuf::from("/schemas/root.yaml"));
        let remote = base
            .resolve("https://example.org/schemas/core.yaml")
            .unwrap()
            .unwrap();
        assert_eq!(
            remote,
            ImportLocation::Remote(Url::parse("https://example.org/schemas/core.yaml").unwrap())
        );

        // Relative imports inside a remote schema stay remote
        assert_eq!(
            remote.resolve("units").unwrap(),
            Some(ImportLocation::Remote(
                Url::parse("https://example.org/schemas/units.yaml").unwrap()
            ))
        );

        assert!(matches!(
            base.resolve("ftp://example.org/core.yaml"),
            Err(SchemaError::InvalidImport { .. })
        ));
    }

    const REMOTE_COMMON: &str = r#"
name: common
imports:
  - units
classes:
  Entity:
    attributes:
      label:
        range: string
"#;

    const REMOTE_UNITS: &str = r#"
name: units
classes:
  Measurement:
    attributes:
      unit:
        range: string
"#;

    /// Serve `documents` by request path over plain HTTP; other paths get a 404
    async fn serve(documents: &'static [(&'static str, &'static str)]) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let response = match documents.iter().find(|(doc_path, _)| *doc_path == path) {
                    Some((_, body)) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/yaml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    ),
                    None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string(),
                };
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    async fn load_with_remote_import(dir: &TempDir, import: Url) -> SchemaView {
        let root = write(
            dir,
            "root.yaml",
            &format!(
                "name: root\nimports:\n  - {}\nclasses:\n  Sample:\n    is_a: Entity\n",
                import
            ),
        );
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        SchemaView::load(&root).await.unwrap().with_client(client)
    }

    #[tokio::test]
    async fn test_merge_remote_imports() {
        let base = serve(&[
            ("/schemas/common.yaml", REMOTE_COMMON),
            ("/schemas/units.yaml", REMOTE_UNITS),
        ])
        .await;
        let dir = TempDir::new().unwrap();
        let mut view =
            load_with_remote_import(&dir, base.join("schemas/common.yaml").unwrap()).await;

        view.merge_imports().await.unwrap();

        // units.yaml is resolved against the remote schema that imports it
        assert_eq!(view.all_classes(), vec!["Sample", "Entity", "Measurement"]);
        assert_eq!(
            view.class_ancestors("Sample").unwrap(),
            vec!["Sample", "Entity"]
        );
        let induced = view.class_induced_slots("Sample").unwrap();
        assert_eq!(induced[0].name.as_deref(), Some("label"));
    }

    #[tokio::test]
    async fn test_remote_import_not_found() {
        let base = serve(&[]).await;
        let dir = TempDir::new().unwrap();
        let missing = base.join("missing.yaml").unwrap();
        let mut view = load_with_remote_import(&dir, missing.clone()).await;

        let err = view.merge_imports().await.unwrap_err();
        assert!(matches!(err, SchemaError::Fetch { ref url, .. } if *url == missing.to_string()));
    }
}
