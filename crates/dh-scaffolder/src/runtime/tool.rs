//! Package manager probing and dependency installation
//!
//! The install command's output is forwarded live: one task per output
//! stream, joined with the child's exit.

use crate::error::ScaffoldError;
use crate::runtime::check::{check_tool, RuntimeInfo};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{self, AsyncRead, AsyncWrite};
use tokio::process::Command;
use tokio::task::JoinHandle;

/// A package manager that installs the generated project's dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
    install_args: Vec<String>,
}

impl PackageManager {
    /// A package manager installed with `<program> install`
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_install_args(program, ["install"])
    }

    pub fn with_install_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            install_args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The install command as the user would type it
    pub fn install_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.install_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `npm` is a batch script on Windows
    fn executable(&self) -> String {
        if cfg!(windows) && Path::new(&self.program).extension().is_none() {
            format!("{}.cmd", self.program)
        } else {
            self.program.clone()
        }
    }

    /// Check the package manager answers `--version`
    pub async fn probe(&self) -> Result<RuntimeInfo, ScaffoldError> {
        let mut info = check_tool(&self.executable()).await;
        if !info.available {
            return Err(ScaffoldError::ToolMissing(self.program.clone()));
        }
        info.name = self.program.clone();
        Ok(info)
    }

    /// Run the install command in `project_dir`, forwarding its output as it arrives
    pub async fn install(&self, project_dir: &Path) -> Result<(), ScaffoldError> {
        let mut child = Command::new(self.executable())
            .args(&self.install_args)
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ScaffoldError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = child.stdout.take().map(|out| forward(out, io::stdout()));
        let stderr = child.stderr.take().map(|err| forward(err, io::stderr()));

        let status = child.wait().await.map_err(|source| ScaffoldError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Drain whatever the child wrote before exiting
        let mut forward_error = None;
        for task in stdout.into_iter().chain(stderr) {
            if let Err(err) = drain(task).await {
                forward_error.get_or_insert(err);
            }
        }

        if !status.success() {
            return Err(ScaffoldError::Install);
        }
        match forward_error {
            Some(source) => Err(ScaffoldError::ForwardOutput {
                program: self.program.clone(),
                source,
            }),
            None => Ok(()),
        }
    }
}

/// Wait for a forwarding task; a panicked or cancelled task counts as an I/O failure
async fn drain(task: JoinHandle<io::Result<u64>>) -> io::Result<u64> {
    task.await.map_err(io::Error::other)?
}

fn forward<R, W>(mut reader: R, mut writer: W) -> JoinHandle<io::Result<u64>>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move { io::copy(&mut reader, &mut writer).await })
}
