//! Task catalog discovery
//!
//! Builds the immutable pairing of task artifacts to solution artifacts from
//! the configured folders. A task folder holds one file per task; the
//! matching solution lives in a sibling folder named
//! `<folder><folder-suffix>`, in a file named `<stem><file-suffix>.<ext>`.

use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::{debug, info};
use walkdir::WalkDir;

use deckstore::TaskPair;

use crate::config::TasksConfig;

/// Discover the full task catalog from the configured folders.
///
/// Fails when a solution folder or solution file is missing, naming the
/// exact path to add. The resulting order is deterministic (sorted per
/// folder); randomization happens at draw time, not here.
pub fn discover(tasks: &TasksConfig) -> Result<Vec<TaskPair>> {
    let mut catalog = Vec::new();

    for folder in tasks.expanded_folders() {
        if !folder.is_dir() {
            return Err(eyre::eyre!(
                "Task folder {} is missing or not a directory. Check the tasks section of your config.",
                folder.display()
            ));
        }

        let solutions = solution_folder(&folder, &tasks.solution_folder_suffix);
        if !solutions.is_dir() {
            return Err(eyre::eyre!(
                "Solution folder for {} is missing! Please add {}.",
                folder.display(),
                solutions.display()
            ));
        }

        let mut entries: Vec<PathBuf> = WalkDir::new(&folder)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        entries.sort();

        let mut count = 0usize;
        for task_path in entries {
            let solution_path = solution_file(&solutions, &task_path, &tasks.solution_file_suffix);
            if !solution_path.is_file() {
                return Err(eyre::eyre!(
                    "Solution for {} is missing! Please add {}.",
                    task_path.display(),
                    solution_path.display()
                ));
            }

            debug!(task = %task_path.display(), solution = %solution_path.display(), "paired task");
            catalog.push(TaskPair::new(task_path, solution_path));
            count += 1;
        }

        info!(folder = %folder.display(), count, "discovered tasks");
        println!("{} tasks found in {}", count, folder_label(&folder));
    }

    if catalog.is_empty() {
        return Err(eyre::eyre!(
            "No tasks found in the configured folders. Add task files before starting a session."
        ));
    }

    Ok(catalog)
}

/// Sibling solution folder for a task folder
fn solution_folder(folder: &Path, suffix: &str) -> PathBuf {
    let name = folder.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    folder.with_file_name(format!("{}{}", name, suffix))
}

/// Expected solution file for a task file, keeping the task's extension
fn solution_file(solutions: &Path, task_file: &Path, suffix: &str) -> PathBuf {
    let stem = task_file.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    match task_file.extension() {
        Some(ext) => solutions.join(format!("{}{}.{}", stem, suffix, ext.to_string_lossy())),
        None => solutions.join(format!("{}{}", stem, suffix)),
    }
}

fn folder_label(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn deck_config(folder: &Path) -> TasksConfig {
        TasksConfig {
            folders: vec![folder.to_string_lossy().into_owned()],
            ..Default::default()
        }
    }

    fn build_deck(root: &Path, names: &[&str]) -> PathBuf {
        let tasks_dir = root.join("algebra");
        let solutions_dir = root.join("algebra_solutions");
        fs::create_dir_all(&tasks_dir).unwrap();
        fs::create_dir_all(&solutions_dir).unwrap();

        for name in names {
            fs::write(tasks_dir.join(format!("{name}.png")), b"task").unwrap();
            fs::write(solutions_dir.join(format!("{name}_solution.png")), b"solution").unwrap();
        }

        tasks_dir
    }

    #[test]
    fn test_discover_pairs_tasks_with_solutions() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = build_deck(temp.path(), &["q1", "q2"]);

        let catalog = discover(&deck_config(&tasks_dir)).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].task, tasks_dir.join("q1.png"));
        assert_eq!(
            catalog[0].solution,
            temp.path().join("algebra_solutions").join("q1_solution.png")
        );
    }

    #[test]
    fn test_discover_order_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = build_deck(temp.path(), &["q3", "q1", "q2"]);

        let catalog = discover(&deck_config(&tasks_dir)).unwrap();

        let names: Vec<_> = catalog
            .iter()
            .map(|p| p.task.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["q1.png", "q2.png", "q3.png"]);
    }

    #[test]
    fn test_trailing_slash_in_folder_is_accepted() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = build_deck(temp.path(), &["q1"]);

        let tasks = TasksConfig {
            folders: vec![format!("{}/", tasks_dir.display())],
            ..Default::default()
        };

        let catalog = discover(&tasks).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_task_folder_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = discover(&deck_config(&missing)).unwrap_err();
        assert!(err.to_string().contains("Task folder"));
    }

    #[test]
    fn test_missing_solution_folder_fails() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = temp.path().join("algebra");
        fs::create_dir_all(&tasks_dir).unwrap();
        fs::write(tasks_dir.join("q1.png"), b"task").unwrap();

        let err = discover(&deck_config(&tasks_dir)).unwrap_err();
        assert!(err.to_string().contains("Solution folder"));
        assert!(err.to_string().contains("algebra_solutions"));
    }

    #[test]
    fn test_missing_solution_file_fails() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = build_deck(temp.path(), &["q1"]);
        fs::write(tasks_dir.join("q2.png"), b"task").unwrap();

        let err = discover(&deck_config(&tasks_dir)).unwrap_err();
        assert!(err.to_string().contains("q2_solution.png"));
    }

    #[test]
    fn test_empty_deck_fails() {
        let temp = TempDir::new().unwrap();
        let tasks_dir = build_deck(temp.path(), &[]);

        let err = discover(&deck_config(&tasks_dir)).unwrap_err();
        assert!(err.to_string().contains("No tasks found"));
    }
}
