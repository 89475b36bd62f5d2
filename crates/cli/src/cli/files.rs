use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};
use route_params::is_route_file;
use walkdir::{DirEntry, WalkDir};

const IGNORED_DIRS: &[&str] = &["node_modules", ".next", ".git"];

/// Route files under `inputs`, sorted and deduplicated.
///
/// Directories are walked recursively. A file given explicitly is kept only
/// when its name marks it as a route file.
pub fn collect_route_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            if is_route_file(input) {
                files.push(input.clone());
            } else {
                tracing::warn!("{} is not a route file, skipping", input.display());
            }
            continue;
        }
        if !input.is_dir() {
            bail!("{} does not exist", input.display());
        }

        let walker = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_ignored(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("Failed to read directory entry: {}", err);
                    continue;
                }
            };
            if entry.file_type().is_file() && is_route_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

/// `path` relative to `project`, joined with `/`.
pub fn display_path(path: &Path, project: &Path) -> String {
    let relative = path.strip_prefix(project).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(Cow::Borrowed("")),
            other => Some(other.as_os_str().to_string_lossy()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
