//! Package manager detection

use std::fmt;
use tokio::process::Command;

/// Runtime detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.version, self.available) {
            (Some(version), true) => write!(f, "{} ({})", self.name, version),
            (None, true) => write!(f, "{} (unknown version)", self.name),
            (_, false) => write!(f, "{} (not installed)", self.name),
        }
    }
}

/// Run `<program> --version`; the tool counts as available only if that succeeds
pub async fn check_tool(program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output().await;

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name: program.to_string(),
                version: (!version.is_empty()).then_some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}
