//! DataHarmonizer CLI - Project scaffolding from a LinkML schema

use clap::Parser;
use colored::Colorize;
use dh_scaffolder::tui::CreateArgs;
use dh_scaffolder::{PackageManifest, ProductConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// DataHarmonizer product configuration
#[derive(Clone)]
pub struct DataHarmonizerConfig;

impl ProductConfig for DataHarmonizerConfig {
    fn display_name(&self) -> &'static str {
        "DataHarmonizer"
    }

    fn marker_class(&self) -> &'static str {
        "dh_interface"
    }

    fn package_manifest(&self) -> PackageManifest {
        PackageManifest::data_harmonizer()
    }

    fn package_manager_env(&self) -> &'static str {
        "DH_PACKAGE_MANAGER"
    }

    fn template_dir_env(&self) -> &'static str {
        "DH_TEMPLATE_DIR"
    }

    fn min_package_manager_version(&self) -> Option<&'static str> {
        Some("7.0.0")
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/cidgoh/DataHarmonizer"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-data-harmonizer")]
#[command(about = "Create a DataHarmonizer project from a LinkML schema")]
#[command(version)]
pub struct Args {
    /// LinkML schema file (YAML)
    pub schema: PathBuf,

    /// Project name, also the directory created in the current directory
    #[arg(short, long)]
    pub name: Option<String>,

    /// Classes to use as templates (comma-separated); skips the class prompt
    #[arg(short, long, value_delimiter = ',')]
    pub classes: Option<Vec<String>>,

    /// Local directory to use as the project template (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the package manager check and `npm install`
    #[arg(long = "skip-install")]
    pub skip_install: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            schema_path: args.schema,
            project_name: args.name,
            classes: args.classes,
            template_dir: args.template_dir,
            skip_install: args.skip_install,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("{:#}", err).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = DataHarmonizerConfig;
    dh_scaffolder::run(&config, args.into()).await?;
    Ok(())
}
