use crate::{
    config::{ScaffoldConfig, STATIC_DIR_NAME, STATIC_SUBDIRS, TEMPLATES_DIR_NAME},
    errors::{FileOperation, IoError},
    plan::GenerationPlan,
    template::{Boilerplate, Renderer, TemplateError},
};
use colored::Colorize;
use miette::Diagnostic;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use thiserror::Error;

const RUN_FILE: &str = "run.py";
const INIT_FILE: &str = "__init__.py";
const INDEX_TEMPLATE: &str = "index.html";

#[derive(Debug, Error, Diagnostic)]
pub enum ScaffoldError {
    #[error("package directory already exists: '{}'", .path.display())]
    #[diagnostic(
        code(flaskgen::scaffold::destination_exists),
        help("Re-run with --overwrite to replace it, or choose another project folder")
    )]
    DestinationExists { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),
}

/// Stages every directory and file for `config`, in the order they are applied.
///
/// All directories come first. Files follow in a fixed order: runner, package
/// init, index template, then views or the blueprint init, then the optional
/// modules.
pub fn build_plan(config: &ScaffoldConfig) -> Result<GenerationPlan, ScaffoldError> {
    let features = config.features();
    let layout = config.layout();
    let renderer = Renderer::new(features)?;

    let mut plan = GenerationPlan::new();

    plan.add_dir(&layout.package_dir);
    plan.add_dir(&layout.templates_dir);
    add_static_dirs(&mut plan, &layout.static_dir);

    if features.use_blueprints {
        plan.add_dir(&layout.blueprint_dir);
        add_static_dirs(&mut plan, &layout.blueprint_dir.join(STATIC_DIR_NAME));
        plan.add_dir(layout.blueprint_dir.join(TEMPLATES_DIR_NAME));
    }

    plan.add_file(
        config.root().join(RUN_FILE),
        renderer.render(Boilerplate::Runner)?,
    );
    plan.add_file(
        layout.package_dir.join(INIT_FILE),
        renderer.render(Boilerplate::PackageInit)?,
    );
    plan.add_file(layout.templates_dir.join(INDEX_TEMPLATE), String::new());

    if features.use_blueprints {
        plan.add_file(
            layout.blueprint_dir.join(INIT_FILE),
            renderer.render(Boilerplate::BlueprintInit)?,
        );
    } else {
        add_module(&mut plan, &renderer, &layout.package_dir, Boilerplate::Views)?;
    }

    let optional_modules = [
        (features.include_configs, Boilerplate::Config),
        (features.include_forms, Boilerplate::Forms),
        (features.include_models, Boilerplate::Models),
    ];
    for (enabled, boilerplate) in optional_modules {
        if enabled {
            add_module(&mut plan, &renderer, &layout.package_dir, boilerplate)?;
        }
    }

    Ok(plan)
}

fn add_static_dirs(plan: &mut GenerationPlan, static_dir: &Path) {
    plan.add_dir(static_dir);
    for sub in STATIC_SUBDIRS {
        plan.add_dir(static_dir.join(sub));
    }
}

/// Stages a package-level module whose file name matches its boilerplate name.
fn add_module(
    plan: &mut GenerationPlan,
    renderer: &Renderer,
    package_dir: &Path,
    boilerplate: Boilerplate,
) -> Result<(), ScaffoldError> {
    let contents = renderer.render(boilerplate)?;

    plan.add_file(package_dir.join(boilerplate.name()), contents);

    Ok(())
}

/// True when anything occupies `path`, dangling symlinks included.
fn is_occupied(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Fails with [`ScaffoldError::DestinationExists`] when the package directory is
/// already present and `overwrite` was not requested. Never touches the filesystem.
pub fn check_destination(config: &ScaffoldConfig) -> Result<(), ScaffoldError> {
    let package_dir = &config.layout().package_dir;

    if is_occupied(package_dir) && !config.overwrite() {
        return Err(ScaffoldError::DestinationExists {
            path: package_dir.clone(),
        });
    }

    Ok(())
}

/// Removes an existing package directory so the new scaffold replaces it entirely.
fn clear_destination(config: &ScaffoldConfig) -> Result<(), ScaffoldError> {
    let package_dir = &config.layout().package_dir;

    if !config.overwrite() {
        return Ok(());
    }

    // a symlink is removed itself, never its target
    let Ok(metadata) = std::fs::symlink_metadata(package_dir) else {
        return Ok(());
    };

    log::debug!("removing existing package: {}", package_dir.display());

    let removed = if metadata.file_type().is_dir() {
        std::fs::remove_dir_all(package_dir)
    } else {
        std::fs::remove_file(package_dir)
    };
    removed.map_err(|error| IoError::new(FileOperation::Remove, package_dir.clone(), error))?;

    println!("{} {}", "remove".red(), package_dir.display());

    Ok(())
}

/// Applies a [`GenerationPlan`]: every directory first, then every file.
///
/// Stops at the first failure. Whatever was created before it stays on disk.
pub fn apply_plan(plan: &GenerationPlan) -> Result<(), ScaffoldError> {
    for dir in plan.dirs() {
        create_directory(dir)?;
    }

    for (path, contents) in plan.files() {
        write_file(path, contents)?;
    }

    Ok(())
}

/// Generates the project described by `config`.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if:
///
/// - The package directory exists and `overwrite` is not set. Nothing is changed.
/// - A boilerplate template fails to render. Nothing is changed.
/// - Removing, creating or writing a path fails. The run stops there without rollback.
pub fn generate(config: &ScaffoldConfig) -> Result<(), ScaffoldError> {
    log::debug!("scaffolding with config: {:?}", config);

    check_destination(config)?;

    let plan = build_plan(config)?;

    clear_destination(config)?;

    apply_plan(&plan)?;

    log::info!("scaffolded {} entries", plan.entries.len());

    Ok(())
}

fn create_directory(path: &Path) -> Result<(), ScaffoldError> {
    std::fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    println!("{} {}{}", "create".green(), path.display(), MAIN_SEPARATOR);

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    std::fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    println!("{} {}", "create".green(), path.display());

    Ok(())
}
