use colored::Colorize;

use crate::{
    config::ScaffoldConfig,
    preview::preview_as_tree,
    scaffold::{self, ScaffoldError},
};

/// Creates the project skeleton described by `config` and reports each created path.
///
/// # Errors
///
/// Returns a [`ScaffoldError`] if:
///
/// - The package directory already exists and overwriting was not requested.
/// - A directory or file cannot be removed, created or written to.
/// - Tera fails to render one of the built-in boilerplate files.
pub fn generate(config: &ScaffoldConfig) -> Result<(), ScaffoldError> {
    log::debug!("generating project in: {}", config.root().display());

    scaffold::generate(config)?;

    println!("{}", "Project created.".bold().green());

    Ok(())
}

/// Prints the tree `generate` would produce for `config` without writing anything.
///
/// # Errors
///
/// Fails the same way [`generate`] would before its first write: on a package
/// directory collision or a rendering error.
pub fn preview(config: &ScaffoldConfig) -> Result<(), ScaffoldError> {
    scaffold::check_destination(config)?;

    let plan = scaffold::build_plan(config)?;

    preview_as_tree(&plan, config.root());

    Ok(())
}
