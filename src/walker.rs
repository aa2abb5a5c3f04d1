use std::path::{Path, PathBuf};

use crate::error::Result;

/// A file discovered inside a vault.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Path relative to the vault root directory.
    pub relative_path: PathBuf,
}

/// Recursively walk a vault and discover every file in it.
///
/// Skips hidden files/directories (names starting with `.`). Notes and
/// attachments are both returned; callers decide which are candidates.
/// Results are sorted by relative path.
pub fn discover_files(root: &Path) -> Result<Vec<DiscoveredFile>> {
    let canonical_root = root.canonicalize()?;
    let mut results = Vec::new();
    walk_dir(&canonical_root, &canonical_root, &mut results)?;
    results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(results)
}

fn walk_dir(
    root: &Path,
    current: &Path,
    results: &mut Vec<DiscoveredFile>,
) -> Result<()> {
    let entries = std::fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        // Skip hidden files and directories (.obsidian, .git, ...).
        if name.starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_dir(root, &entry.path(), results)?;
        } else if file_type.is_symlink() {
            let resolved = match entry.path().canonicalize() {
                Ok(p) => p,
                Err(_) => continue, // Skip broken symlinks
            };
            // Cycle prevention.
            if resolved.starts_with(root) && resolved.is_dir() {
                continue;
            }
            if resolved.is_file() {
                results.push(make_discovered(root, &entry.path()));
            }
        } else if file_type.is_file() {
            results.push(make_discovered(root, &entry.path()));
        }
    }

    Ok(())
}

fn make_discovered(root: &Path, original_path: &Path) -> DiscoveredFile {
    let relative_path = original_path
        .strip_prefix(root)
        .unwrap_or(original_path)
        .to_path_buf();

    DiscoveredFile { relative_path }
}
