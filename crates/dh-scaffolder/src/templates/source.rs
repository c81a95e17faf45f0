//! Template sources: the template bundled in the binary, or a local directory

use crate::product::ProductConfig;
use rust_embed::RustEmbed;
use std::io;
use std::path::PathBuf;
use tokio::fs;
use walkdir::WalkDir;

#[derive(RustEmbed)]
#[folder = "template/"]
struct BundledTemplate;

/// A top-level template file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Where template files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Bundled,
    Local(PathBuf),
}

impl TemplateSource {
    /// The product's template directory override (if set), otherwise the bundled template
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        match std::env::var_os(config.template_dir_env()) {
            Some(dir) if !dir.is_empty() => Self::Local(PathBuf::from(dir)),
            _ => Self::Bundled,
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    /// Files at the top level of the template, sorted by name. Subdirectories are not part
    /// of the template.
    pub async fn files(&self) -> io::Result<Vec<TemplateFile>> {
        let mut files = match self {
            TemplateSource::Bundled => BundledTemplate::iter()
                .filter(|name| !name.contains('/'))
                .filter_map(|name| {
                    BundledTemplate::get(&name).map(|file| TemplateFile {
                        name: name.to_string(),
                        contents: file.data.into_owned(),
                    })
                })
                .collect::<Vec<_>>(),
            TemplateSource::Local(dir) => {
                let mut files = Vec::new();
                for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
                    let entry = entry?;
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let contents = fs::read(entry.path()).await?;
                    files.push(TemplateFile {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        contents,
                    });
                }
                files
            }
        };

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_defaults_to_bundled() {
        assert_eq!(TemplateSource::from_config(&TestProduct), TemplateSource::Bundled);
    }

    #[tokio::test]
    async fn test_bundled_template_files() {
        let files = TemplateSource::Bundled.files().await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert!(names.contains(&"_gitignore"));
        assert!(names.contains(&"index.html"));
        assert!(names.contains(&"main.js"));
        assert!(files.iter().all(|f| !f.contents.is_empty()));
    }

    #[tokio::test]
    async fn test_local_template_is_top_level_only() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let files = TemplateSource::local(dir.path()).files().await.unwrap();
        assert_eq!(
            files,
            vec![
                TemplateFile {
                    name: "a.txt".to_string(),
                    contents: b"a".to_vec(),
                },
                TemplateFile {
                    name: "b.txt".to_string(),
                    contents: b"b".to_vec(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_local_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = TemplateSource::local(dir.path().join("missing"));
        assert!(source.files().await.is_err());
    }
}
