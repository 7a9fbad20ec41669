// Path utilities shared by traversal and validation
// Keys written by `calculate` must be the same strings `validate` later stats

use std::path::{Component, Path, PathBuf};

/// Clean a path by removing redundant components like "." and ".."
/// Purely lexical, the path does not have to exist
pub fn clean_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => continue,
            Component::ParentDir => {
                match components.last() {
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    // ".." directly under the root stays at the root
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => components.push(component),
                }
            }
            _ => components.push(component),
        }
    }

    let result: PathBuf = components.into_iter().collect();
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Key for a file found while walking `root`
///
/// The entry is re-rooted onto the parent of the configured root, so a walk
/// of `data/photos` yields `data/photos/a.jpg` no matter how the walker
/// spells its own paths.
pub fn traversal_key(root: &Path, entry: &Path) -> PathBuf {
    let relative = entry.strip_prefix(root).unwrap_or(entry);
    let parent = root.parent().unwrap_or_else(|| Path::new(""));
    let joined = match root.file_name() {
        Some(name) => parent.join(name).join(relative),
        None => root.join(relative),
    };
    clean_path(&joined)
}

/// Render a path as a mapping key
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
