//! Error types for schema loading and project scaffolding
//!
//! Every step of the scaffolding workflow returns one of these instead of
//! exiting the process. The binary owns the single place where an error is
//! turned into a message and an exit status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, merging or flattening a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Could not read schema file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse schema {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Could not fetch schema import {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid schema import '{import}' in {origin}")]
    InvalidImport { import: String, origin: String },

    #[error("Class '{0}' is not defined in the schema")]
    UnknownClass(String),
}

/// Errors raised by the scaffolding workflow
///
/// Each variant maps to exactly one failing step, and filesystem variants
/// carry the path that failed.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("`{0}` not found")]
    ToolMissing(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Could not determine the current directory")]
    WorkingDir(#[source] io::Error),

    #[error("No classes selected. Project will not be generated")]
    NoClassesSelected,

    #[error("Project name must not be empty")]
    EmptyProjectName,

    #[error("Class '{0}' cannot be selected (available: {1})")]
    UnknownClass(String, String),

    #[error("Could not create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not copy template files to {}", dest.display())]
    CopyTemplate {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write package.json to {}", dest.display())]
    WriteManifest {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create directory: {}", path.display())]
    CreateSchemasDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not export schema to {}", path.display())]
    ExportSchema {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write menu.json to {}", dest.display())]
    WriteMenu {
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not serialize {what}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Error while installing dependencies")]
    Install,

    #[error("Could not forward the output of `{program}`")]
    ForwardOutput {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Prompt failed")]
    Prompt(#[source] io::Error),
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;
