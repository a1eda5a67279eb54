//! Recursive traversal collecting matching media files.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::filter::MediaFilter;

/// Collects media files under `path`.
///
/// A single matching file yields a one-element result; a single
/// non-matching file or a non-existent path yields an empty result (the
/// caller decides whether empty is fatal). A directory is walked
/// recursively and every matching regular file is returned. Subtrees
/// that cannot be read are logged and skipped rather than aborting the
/// walk.
pub fn discover(path: &Path, filter: &MediaFilter) -> Vec<PathBuf> {
    if path.is_file() {
        if filter.matches(path) {
            return vec![resolve(path)];
        }
        return Vec::new();
    }
    if !path.is_dir() {
        return Vec::new();
    }

    let mut found = Vec::new();
    walk(path, filter, &mut found);
    found
}

fn walk(dir: &Path, filter: &MediaFilter, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            walk(&path, filter, found);
        } else if path.is_file() && filter.matches(&path) {
            found.push(resolve(&path));
        }
    }
}

/// Resolves to an absolute, symlink-free path where possible.
fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn media_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("a.mp4"), b"A").unwrap();
        fs::write(root.join("b.MOV"), b"B").unwrap();
        fs::write(root.join("notes.txt"), b"N").unwrap();

        fs::create_dir_all(root.join("nested").join("deep")).unwrap();
        fs::write(root.join("nested").join("c.mp4"), b"C").unwrap();
        fs::write(root.join("nested").join("deep").join("d.mov"), b"D").unwrap();
        fs::write(root.join("nested").join("deep").join("thumb.png"), b"P").unwrap();

        dir
    }

    #[test]
    fn finds_only_matching_files_recursively() {
        let dir = media_tree();
        let found = discover(dir.path(), &MediaFilter::default());

        assert_eq!(found.len(), 4);
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert!(names.contains(&"a.mp4".to_string()));
        assert!(names.contains(&"b.MOV".to_string()));
        assert!(names.contains(&"c.mp4".to_string()));
        assert!(names.contains(&"d.mov".to_string()));
    }

    #[test]
    fn results_are_absolute() {
        let dir = media_tree();
        let found = discover(dir.path(), &MediaFilter::default());
        assert!(found.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn single_matching_file_yields_one_element() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("clip.mp4");
        fs::write(&file, b"X").unwrap();

        let found = discover(&file, &MediaFilter::default());
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn single_non_matching_file_yields_empty() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, b"X").unwrap();

        let found = discover(&file, &MediaFilter::default());
        assert!(found.is_empty());
    }

    #[test]
    fn nonexistent_path_yields_empty() {
        let found = discover(
            Path::new("/does/not/exist/anywhere"),
            &MediaFilter::default(),
        );
        assert!(found.is_empty());
    }

    #[test]
    fn empty_directory_yields_empty() {
        let dir = TempDir::new().unwrap();
        let found = discover(dir.path(), &MediaFilter::default());
        assert!(found.is_empty());
    }

    #[test]
    fn no_duplicates() {
        let dir = media_tree();
        let mut found = discover(dir.path(), &MediaFilter::default());
        let before = found.len();
        found.sort();
        found.dedup();
        assert_eq!(found.len(), before);
    }
}
