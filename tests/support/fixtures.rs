// ABOUTME: Fixtures for building websites and local site directories.
// ABOUTME: Keeps test setup short and readable.

use skiff::config::{Config, Website};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary site directory populated with `files` (key, content).
pub fn site_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), files);
    dir
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (key, content) in files {
        let path = root.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// A validated website named `landing` serving `root`.
pub fn website(root: &Path) -> Website {
    website_from_yaml(&format!("site: landing\npath: {}\n", root.display()))
}

pub fn website_from_yaml(yaml: &str) -> Website {
    Config::from_yaml(yaml).unwrap().validate().unwrap()
}
