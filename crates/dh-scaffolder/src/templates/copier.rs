//! Template file copying

use crate::templates::source::TemplateSource;
use std::io;
use std::path::Path;
use tokio::fs;

/// Template files can't be named `.gitignore` (packaging drops them), so they
/// ship under this name and are renamed on copy.
const GITIGNORE_PLACEHOLDER: &str = "_gitignore";

/// Name a template file gets in the generated project
pub fn destination_name(template_name: &str) -> &str {
    if template_name == GITIGNORE_PLACEHOLDER {
        ".gitignore"
    } else {
        template_name
    }
}

/// Copy every top-level template file into `target_dir`, which must exist.
/// Returns the names written, in template order.
pub async fn copy_template(source: &TemplateSource, target_dir: &Path) -> io::Result<Vec<String>> {
    let mut copied_files = Vec::new();

    for file in source.files().await? {
        let name = destination_name(&file.name);
        fs::write(target_dir.join(name), &file.contents).await?;
        copied_files.push(name.to_string());
    }

    Ok(copied_files)
}
