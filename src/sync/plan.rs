// ABOUTME: Diff between the local file set and the remote inventory.
// ABOUTME: A file is uploaded when missing remotely or when its MD5 differs from the ETag.

use std::collections::{HashMap, HashSet};

use super::scan::LocalFile;
use crate::storage::RemoteObject;

/// The changes a sync will apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Files to upload (new or changed), sorted by key.
    pub uploads: Vec<LocalFile>,
    /// Remote keys without a local file, sorted.
    pub deletes: Vec<String>,
    /// Number of files already identical remotely.
    pub unchanged: usize,
}

impl SyncPlan {
    pub fn compute(local: Vec<LocalFile>, remote: Vec<RemoteObject>) -> Self {
        let remote_etags: HashMap<&str, Option<&str>> = remote
            .iter()
            .map(|object| (object.key.as_str(), object.etag.as_deref()))
            .collect();
        let local_keys: HashSet<&str> = local.iter().map(|f| f.key.as_str()).collect();

        let mut deletes: Vec<String> = remote
            .iter()
            .filter(|object| !local_keys.contains(object.key.as_str()))
            .map(|object| object.key.clone())
            .collect();
        deletes.sort();

        let mut unchanged = 0;
        let mut uploads = Vec::new();
        for file in local {
            match remote_etags.get(file.key.as_str()) {
                Some(Some(etag)) if *etag == file.md5 => unchanged += 1,
                _ => uploads.push(file),
            }
        }
        uploads.sort_by(|a, b| a.key.cmp(&b.key));

        Self {
            uploads,
            deletes,
            unchanged,
        }
    }

    /// Uploads plus deletions.
    pub fn file_change_count(&self) -> usize {
        self.uploads.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_change_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn local(key: &str, content: &str) -> LocalFile {
        LocalFile {
            key: key.to_string(),
            path: PathBuf::from(key),
            size: content.len() as u64,
            md5: format!("{:x}", md5::compute(content)),
        }
    }

    fn remote(key: &str, content: &str) -> RemoteObject {
        RemoteObject {
            key: key.to_string(),
            size: content.len() as u64,
            etag: Some(format!("{:x}", md5::compute(content))),
        }
    }

    #[test]
    fn uploads_new_and_deletes_stale() {
        let plan = SyncPlan::compute(
            vec![local("a.txt", "1"), local("b.txt", "2")],
            vec![remote("a.txt", "1"), remote("c.txt", "3")],
        );

        let uploads: Vec<_> = plan.uploads.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(uploads, vec!["b.txt"]);
        assert_eq!(plan.deletes, vec!["c.txt".to_string()]);
        assert_eq!(plan.unchanged, 1);
        assert_eq!(plan.file_change_count(), 2);
    }

    #[test]
    fn changed_content_is_uploaded() {
        let plan = SyncPlan::compute(vec![local("a.txt", "new")], vec![remote("a.txt", "old")]);
        assert_eq!(plan.uploads.len(), 1);
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn multipart_or_missing_etags_force_upload() {
        let mut object = remote("big.bin", "x");
        object.etag = Some("d41d8cd98f00b204e9800998ecf8427e-3".to_string());
        let mut untagged = remote("a.txt", "1");
        untagged.etag = None;

        let plan = SyncPlan::compute(
            vec![local("big.bin", "x"), local("a.txt", "1")],
            vec![object, untagged],
        );
        assert_eq!(plan.uploads.len(), 2);
    }

    #[test]
    fn identical_trees_produce_empty_plan() {
        let plan = SyncPlan::compute(vec![local("a.txt", "1")], vec![remote("a.txt", "1")]);
        assert!(plan.is_empty());
        assert_eq!(plan.unchanged, 1);
    }
}
