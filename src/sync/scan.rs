// ABOUTME: Recursive scan of the local site directory.
// ABOUTME: Produces bucket keys and content hashes for every regular file.

use snafu::{OptionExt, ResultExt, ensure};
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::error::{MissingDirectorySnafu, NonUtf8PathSnafu, ReadFileSnafu, SyncError, WalkSnafu};

const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// A regular file found under the site directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Object key: the path relative to the root, `/`-separated.
    pub key: String,
    /// Absolute or root-joined path on disk.
    pub path: PathBuf,
    pub size: u64,
    /// Hex MD5 of the content, comparable with single-part ETags.
    pub md5: String,
}

/// Walk `root` recursively (following symlinks) and hash every file.
///
/// Blocking; run it on a blocking thread from async code.
pub fn scan_directory(root: &Path) -> Result<Vec<LocalFile>, SyncError> {
    ensure!(root.is_dir(), MissingDirectorySnafu { path: root });

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.context(WalkSnafu { path: root })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let key = object_key(relative)?;
        let (size, md5) = hash_file(path)?;

        files.push(LocalFile {
            key,
            path: path.to_path_buf(),
            size,
            md5,
        });
    }

    tracing::debug!("Scanned {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Join the normal components of a relative path with `/`.
pub fn object_key(relative: &Path) -> Result<String, SyncError> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_str().context(NonUtf8PathSnafu { path: relative })?);
        }
    }
    Ok(parts.join("/"))
}

fn hash_file(path: &Path) -> Result<(u64, String), SyncError> {
    let mut file = File::open(path).context(ReadFileSnafu { path })?;
    let mut context = md5::Context::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];
    let mut size = 0u64;

    loop {
        let read = file.read(&mut buffer).context(ReadFileSnafu { path })?;
        if read == 0 {
            break;
        }
        context.consume(&buffer[..read]);
        size += read as u64;
    }

    Ok((size, format!("{:x}", context.compute())))
}
