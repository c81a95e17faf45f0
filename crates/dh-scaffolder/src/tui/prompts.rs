//! Charm-style CLI prompts using cliclack

use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::project::{self, ProjectPlan};
use crate::runtime::{check_compatibility, PackageManager};
use crate::schema::{self, SchemaProvider};
use crate::select::{class_choices, SelectionAnswers};
use crate::templates::{PackageManifest, TemplateSource};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Descriptions for the scripts of the generated `package.json`
const SCRIPT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("dev", "Start the development server."),
    ("build", "Bundle the app into static files for production."),
    ("preview", "Preview the production build locally."),
];

/// Arguments for the create workflow
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Schema file to generate the project from
    pub schema_path: PathBuf,

    /// Project name; prompted for when absent
    pub project_name: Option<String>,

    /// Classes to use as templates; prompted for when absent
    pub classes: Option<Vec<String>>,

    /// Local template directory instead of the bundled template
    pub template_dir: Option<PathBuf>,

    /// Skip the package manager check and dependency installation
    pub skip_install: bool,
}

/// Run the create workflow with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name()).map_err(ScaffoldError::Prompt)?;

    // Step 1: Check the package manager before anything else
    let package_manager = PackageManager::new(config.package_manager());
    if args.skip_install {
        cliclack::log::info("Skipping dependency installation").map_err(ScaffoldError::Prompt)?;
    } else {
        check_package_manager(config, &package_manager).await?;
    }

    // Step 2: Load, merge and flatten the schema
    let schema_path =
        std::path::absolute(&args.schema_path).unwrap_or_else(|_| args.schema_path.clone());
    cliclack::log::info(format!(
        "Reading schema file {}",
        schema_path.display().to_string().green()
    ))
    .map_err(ScaffoldError::Prompt)?;
    let view = schema::load_flattened(&schema_path).await?;

    // Step 3: Project name and classes
    let answers = prompt_answers(config, &view, &args)?;

    // Step 4: Write the project
    let current_dir = std::env::current_dir().map_err(ScaffoldError::WorkingDir)?;
    let project_dir = project::project_dir(&current_dir, answers.project_name());
    cliclack::log::step(format!(
        "Creating new {} project in {}",
        config.display_name(),
        project_dir.display().to_string().green()
    ))
    .map_err(ScaffoldError::Prompt)?;

    let template = match &args.template_dir {
        Some(dir) => TemplateSource::local(dir),
        None => TemplateSource::from_config(config),
    };
    if let TemplateSource::Local(dir) = &template {
        cliclack::log::info(format!("Using local template from {}", dir.display()))
            .map_err(ScaffoldError::Prompt)?;
    }

    let manifest = config.package_manifest();
    let schema_name = project::schema_stem(view.source());
    let plan = ProjectPlan {
        project_dir,
        template: &template,
        manifest: &manifest,
        schema: view.schema(),
        schema_name: &schema_name,
        answers: &answers,
    };
    let generated = project::materialize(&plan).await?;
    cliclack::log::success(format!(
        "Created {} files in {}",
        generated.template_files.len() + 3,
        generated.project_dir.display()
    ))
    .map_err(ScaffoldError::Prompt)?;

    // Step 5: Install dependencies
    if !args.skip_install {
        cliclack::log::step("Installing dependencies").map_err(ScaffoldError::Prompt)?;
        package_manager.install(&generated.project_dir).await?;
    }

    // Step 6: Show next steps
    let relative_dir = generated
        .project_dir
        .strip_prefix(&current_dir)
        .unwrap_or(&generated.project_dir);
    print_next_steps(
        &generated.project_dir,
        relative_dir,
        &manifest,
        &package_manager,
        args.skip_install,
    );
    cliclack::outro(format!("Learn more at {}", config.docs_url())).map_err(ScaffoldError::Prompt)?;

    Ok(())
}

async fn check_package_manager<C: ProductConfig>(
    config: &C,
    package_manager: &PackageManager,
) -> Result<()> {
    let info = package_manager.probe().await?;
    cliclack::log::success(format!("Found {}", info)).map_err(ScaffoldError::Prompt)?;

    if let (Some(version), Some(minimum)) = (&info.version, config.min_package_manager_version()) {
        if let Some(warning) = check_compatibility(package_manager.program(), version, minimum) {
            cliclack::log::warning(warning).map_err(ScaffoldError::Prompt)?;
        }
    }

    Ok(())
}

fn prompt_answers<C: ProductConfig, P: SchemaProvider>(
    config: &C,
    provider: &P,
    args: &CreateArgs,
) -> Result<SelectionAnswers> {
    let choices = class_choices(provider, config.marker_class())?;

    // Use --name flag if provided
    let project_name = match &args.project_name {
        Some(name) => {
            cliclack::log::info(format!("Project name: {}", name)).map_err(ScaffoldError::Prompt)?;
            name.clone()
        }
        None => cliclack::input("What would you like your new project to be called?")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err("Please enter a project name")
                } else {
                    Ok(())
                }
            })
            .interact()
            .map_err(ScaffoldError::Prompt)?,
    };

    // Use --classes flag if provided
    if let Some(classes) = &args.classes {
        let answers = SelectionAnswers::from_names(project_name, classes, &choices)?;
        cliclack::log::info(format!("Classes: {}", answers.classes().join(", ")))
            .map_err(ScaffoldError::Prompt)?;
        return Ok(answers);
    }

    if choices.is_empty() {
        return Err(ScaffoldError::NoClassesSelected);
    }

    let mut multi = cliclack::multiselect(
        "The following classes were found in the provided schema. \
         Which should be used as DataHarmonizer templates?",
    );
    for choice in &choices {
        multi = multi.item(choice.name.clone(), &choice.name, "");
    }
    let preselected: Vec<String> = choices
        .iter()
        .filter(|choice| choice.checked)
        .map(|choice| choice.name.clone())
        .collect();

    let selected: Vec<String> = multi
        .initial_values(preselected)
        .required(false)
        .interact()
        .map_err(ScaffoldError::Prompt)?;

    SelectionAnswers::new(project_name, selected)
}

fn print_next_steps(
    project_dir: &Path,
    relative_dir: &Path,
    manifest: &PackageManifest,
    package_manager: &PackageManager,
    skipped_install: bool,
) {
    let run = |script: &str| format!("{} run {}", package_manager.program(), script);

    println!();
    println!(
        "{} Created project at {}",
        "Success!".green(),
        project_dir.display()
    );
    println!("Inside that directory, you can run several commands:");
    println!();

    for script in manifest.script_names() {
        println!("  {}", run(script).cyan());
        if let Some((_, description)) = SCRIPT_DESCRIPTIONS.iter().find(|(name, _)| *name == script) {
            println!("    {}", description);
        }
        println!();
    }

    println!("Get started now by running:");
    println!();
    println!("  cd {}", relative_dir.display());
    if skipped_install {
        println!("  {}", package_manager.install_command());
    }
    if manifest.script_names().any(|script| script == "dev") {
        println!("  {}", run("dev"));
    }
    println!();
}
