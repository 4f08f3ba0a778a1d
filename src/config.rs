use std::path::{Path, PathBuf};

use crate::errors::{FileOperation, IoError};

/// Name of the generated application package.
pub const PACKAGE_DIR_NAME: &str = "app_pkg";
/// Name of the optional blueprint sub-package.
pub const BLUEPRINT_DIR_NAME: &str = "my_blueprint";
pub const TEMPLATES_DIR_NAME: &str = "templates";
pub const STATIC_DIR_NAME: &str = "static";
/// Asset folders created under every `static` directory.
pub const STATIC_SUBDIRS: [&str; 2] = ["css", "js"];

/// Optional parts of the scaffold, each toggled independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub use_blueprints: bool,
    pub include_configs: bool,
    pub include_forms: bool,
    pub include_models: bool,
}

/// Paths derived from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub package_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub blueprint_dir: PathBuf,
}
impl ProjectLayout {
    fn under(root: &Path) -> Self {
        let package_dir = root.join(PACKAGE_DIR_NAME);

        Self {
            templates_dir: package_dir.join(TEMPLATES_DIR_NAME),
            static_dir: package_dir.join(STATIC_DIR_NAME),
            blueprint_dir: package_dir.join(BLUEPRINT_DIR_NAME),
            package_dir,
        }
    }
}

/// Everything a single scaffolding run needs. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    root: PathBuf,
    features: Features,
    overwrite: bool,
    layout: ProjectLayout,
}
impl ScaffoldConfig {
    pub fn new(root: impl Into<PathBuf>, features: Features, overwrite: bool) -> Self {
        let root = root.into();
        let layout = ProjectLayout::under(&root);

        Self {
            root,
            features,
            overwrite,
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }
}

/// Directory holding the running executable, used when no project folder is given.
///
/// # Errors
///
/// Returns an [`IoError`] if the executable path cannot be determined.
pub fn default_root() -> Result<PathBuf, IoError> {
    let exe = std::env::current_exe()
        .map_err(|error| IoError::new(FileOperation::Resolve, PathBuf::new(), error))?;

    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_derived_from_root() {
        let config = ScaffoldConfig::new("/tmp/p1", Features::default(), false);
        let layout = config.layout();

        assert_eq!(layout.package_dir, Path::new("/tmp/p1/app_pkg"));
        assert_eq!(layout.templates_dir, Path::new("/tmp/p1/app_pkg/templates"));
        assert_eq!(layout.static_dir, Path::new("/tmp/p1/app_pkg/static"));
        assert_eq!(layout.blueprint_dir, Path::new("/tmp/p1/app_pkg/my_blueprint"));
    }

    #[test]
    fn test_layout_ignores_features() {
        let features = Features {
            use_blueprints: true,
            include_configs: true,
            include_forms: true,
            include_models: true,
        };
        let plain = ScaffoldConfig::new("proj", Features::default(), false);
        let full = ScaffoldConfig::new("proj", features, true);

        assert_eq!(plain.layout(), full.layout());
        assert!(full.overwrite());
        assert_eq!(full.features(), features);
    }

    #[test]
    fn test_default_root_is_a_directory() {
        let root = default_root();

        assert!(root.is_ok());
        assert!(root.unwrap().is_dir());
    }
}
