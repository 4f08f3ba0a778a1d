use std::path::{Path, PathBuf};

/// What to do at a [`PlanEntry`] destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateDir,
    /// Write the contents, replacing any existing file.
    WriteFile(String),
}
/// A single staged filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub destination: PathBuf,
    pub action: Action,
}
impl PlanEntry {
    pub fn is_file(&self) -> bool {
        matches!(self.action, Action::WriteFile(_))
    }
}
/// Ordered list of changes computed from a configuration before anything is written.
///
/// Entries are kept in insertion order. Applying a plan creates every directory
/// first and then writes every file, so a directory must be staged before any
/// path nested inside it.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub entries: Vec<PlanEntry>,
}
impl GenerationPlan {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        self.entries.push(PlanEntry {
            destination: path.into(),
            action: Action::CreateDir,
        });
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.entries.push(PlanEntry {
            destination: path.into(),
            action: Action::WriteFile(contents),
        });
    }

    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(|e| !e.is_file())
            .map(|e| e.destination.as_path())
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().filter_map(|e| match &e.action {
            Action::WriteFile(contents) => Some((e.destination.as_path(), contents.as_str())),
            Action::CreateDir => None,
        })
    }

    #[cfg(test)]
    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files()
            .find(|(destination, _)| *destination == path)
            .map(|(_, contents)| contents)
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.destination == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_and_files_keep_insertion_order() {
        let mut plan = GenerationPlan::new();
        plan.add_dir("a");
        plan.add_file("a/one.py", "1".to_string());
        plan.add_dir("a/b");
        plan.add_file("a/b/two.py", String::new());

        let dirs: Vec<&Path> = plan.dirs().collect();
        let files: Vec<&Path> = plan.files().map(|(path, _)| path).collect();

        assert_eq!(dirs, vec![Path::new("a"), Path::new("a/b")]);
        assert_eq!(files, vec![Path::new("a/one.py"), Path::new("a/b/two.py")]);
    }

    #[test]
    fn test_file_lookup() {
        let mut plan = GenerationPlan::new();
        plan.add_dir("pkg");
        plan.add_file("pkg/run.py", "print()".to_string());

        assert_eq!(plan.file(Path::new("pkg/run.py")), Some("print()"));
        assert_eq!(plan.file(Path::new("pkg")), None);
        assert!(plan.contains(Path::new("pkg")));
        assert!(!plan.contains(Path::new("pkg/views.py")));
    }
}
