//! Project materialization
//!
//! Writes a new project directory in fixed steps. A failing step stops the
//! run and names the path it failed on; files written by earlier steps are
//! left in place.

use crate::error::{Result, ScaffoldError};
use crate::schema::SchemaDefinition;
use crate::select::SelectionAnswers;
use crate::templates::{copy_template, Menu, PackageManifest, TemplateSource};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

pub const PACKAGE_MANIFEST_FILE: &str = "package.json";
pub const MENU_FILE: &str = "menu.json";
pub const SCHEMAS_DIR: &str = "schemas";

/// Name used for the exported schema file and the menu key: the input file's stem
pub fn schema_stem(schema_path: &Path) -> String {
    schema_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schema".to_string())
}

/// Directory for a project named `project_name` under `cwd`.
///
/// The name is appended component by component, so a rooted name such as
/// `/tmp/app` still lands at `<cwd>/tmp/app`.
pub fn project_dir(cwd: &Path, project_name: &str) -> PathBuf {
    let mut dir = cwd.to_path_buf();
    for component in Path::new(project_name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => dir.push(other),
        }
    }
    dir
}

/// Everything a project is generated from
pub struct ProjectPlan<'a> {
    pub project_dir: PathBuf,
    pub template: &'a TemplateSource,
    pub manifest: &'a PackageManifest,
    pub schema: &'a SchemaDefinition,
    pub schema_name: &'a str,
    pub answers: &'a SelectionAnswers,
}

/// Paths written by [`materialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    pub project_dir: PathBuf,
    pub template_files: Vec<String>,
    pub schema_file: PathBuf,
    pub menu_file: PathBuf,
}

/// Create the project directory and write every generated file into it
pub async fn materialize(plan: &ProjectPlan<'_>) -> Result<GeneratedProject> {
    let dest = plan.project_dir.as_path();

    fs::create_dir_all(dest)
        .await
        .map_err(|source| ScaffoldError::CreateDir {
            path: dest.to_path_buf(),
            source,
        })?;

    let template_files = copy_template(plan.template, dest)
        .await
        .map_err(|source| ScaffoldError::CopyTemplate {
            dest: dest.to_path_buf(),
            source,
        })?;

    let manifest = to_json(plan.manifest, "package.json")?;
    fs::write(dest.join(PACKAGE_MANIFEST_FILE), manifest)
        .await
        .map_err(|source| ScaffoldError::WriteManifest {
            dest: dest.to_path_buf(),
            source,
        })?;

    let schemas_dir = dest.join(SCHEMAS_DIR);
    fs::create_dir_all(&schemas_dir)
        .await
        .map_err(|source| ScaffoldError::CreateSchemasDir {
            path: schemas_dir.clone(),
            source,
        })?;

    let schema_file = schemas_dir.join(format!("{}.json", plan.schema_name));
    let schema = to_json(plan.schema, "schema")?;
    fs::write(&schema_file, schema)
        .await
        .map_err(|source| ScaffoldError::ExportSchema {
            path: schema_file.clone(),
            source,
        })?;

    let menu_file = dest.join(MENU_FILE);
    let menu = Menu::from_selection(plan.schema_name, plan.answers.classes());
    fs::write(&menu_file, to_json(&menu, "menu.json")?)
        .await
        .map_err(|source| ScaffoldError::WriteMenu {
            dest: dest.to_path_buf(),
            source,
        })?;

    Ok(GeneratedProject {
        project_dir: dest.to_path_buf(),
        template_files,
        schema_file,
        menu_file,
    })
}

/// Pretty JSON with two-space indentation
fn to_json<T: Serialize + ?Sized>(value: &T, what: &'static str) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|source| ScaffoldError::Serialize { what, source })
}
