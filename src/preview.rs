use crate::plan::GenerationPlan;
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the directory tree from the plan entries, returning the root node.
///
/// Entries outside `root`, or whose parent was never staged, are left out.
fn build_tree(plan: &GenerationPlan, root: &Path) -> Rc<RefCell<TreeNode>> {
    let tree_root = Rc::new(RefCell::new(TreeNode::new(display_name(root), false)));

    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(root.to_path_buf(), Rc::clone(&tree_root));

    // dirs first so files always find their parent
    let ordered = plan
        .entries
        .iter()
        .filter(|e| !e.is_file())
        .chain(plan.entries.iter().filter(|e| e.is_file()));

    for entry in ordered {
        let Some(parent_path) = entry.destination.parent() else {
            continue;
        };

        let Some(parent_node) = lookup.get(parent_path).map(Rc::clone) else {
            log::debug!(
                "parent: {}, not staged for path: {}",
                parent_path.display(),
                entry.destination.display()
            );
            continue;
        };

        let child = Rc::new(RefCell::new(TreeNode::new(
            display_name(&entry.destination),
            entry.is_file(),
        )));

        parent_node.borrow_mut().children.push(Rc::clone(&child));

        lookup.insert(entry.destination.clone(), child);
    }

    tree_root
}

fn collect_lines(
    node: &Rc<RefCell<TreeNode>>,
    prefix: &str,
    is_last: bool,
    lines: &mut Vec<String>,
) {
    let node_borrow = node.borrow();

    let connector = if is_last { "└── " } else { "├── " };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    lines.push(format!("{}{}{}", prefix.yellow(), connector.yellow(), name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        collect_lines(child, &child_prefix, i == len - 1, lines);
    }
}

/// Renders the plan as ASCII tree lines rooted at `root`.
pub fn tree_lines(plan: &GenerationPlan, root: &Path) -> Vec<String> {
    let tree_root = build_tree(plan, root);

    let mut lines = Vec::new();
    collect_lines(&tree_root, "", true, &mut lines);

    lines
}

pub fn preview_as_tree(plan: &GenerationPlan, root: &Path) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    println!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue()
    );

    for line in tree_lines(plan, root) {
        println!("{}", line);
    }

    println!(
        "\n{} {}",
        "└─".bold().bright_blue(),
        "Dry run, nothing was written".bright_green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_lines_nest_under_root() {
        colored::control::set_override(false);

        let root = Path::new("/tmp/proj");
        let mut plan = GenerationPlan::new();
        plan.add_dir(root.join("pkg"));
        plan.add_dir(root.join("pkg/static"));
        plan.add_file(root.join("run.py"), String::new());
        plan.add_file(root.join("pkg/__init__.py"), String::new());

        let lines = tree_lines(&plan, root);

        assert_eq!(
            lines,
            vec![
                "└── proj",
                "    ├── pkg",
                "    │   ├── static",
                "    │   └── __init__.py",
                "    └── run.py",
            ]
        );
    }

    #[test]
    fn test_tree_skips_unstaged_parents() {
        colored::control::set_override(false);

        let root = Path::new("proj");
        let mut plan = GenerationPlan::new();
        plan.add_file(root.join("missing/orphan.py"), String::new());

        let lines = tree_lines(&plan, root);

        assert_eq!(lines, vec!["└── proj"]);
    }
}
