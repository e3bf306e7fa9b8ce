// ABOUTME: In-memory implementations of the object store, CDN, and output store.
// ABOUTME: Record every call so tests can assert on side effects.

use async_trait::async_trait;
use bytes::Bytes;
use skiff::cdn::{Cdn, CdnError};
use skiff::outputs::{OutputError, OutputStore};
use skiff::storage::{ObjectStore, RejectedKey, RemoteObject, StoreError};
use skiff::types::{BucketName, DistributionId, InvalidationId};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A call made against [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    List(String),
    Put(String),
    Delete(Vec<String>),
}

struct StoredObject {
    body: Bytes,
    content_type: String,
}

/// Object store holding a single bucket in memory. ETags are the MD5 of
/// the stored bytes, like single-part S3 uploads.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    failures: Mutex<HashMap<String, VecDeque<StoreError>>>,
    log: Mutex<Vec<StoreOp>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryStore {
    pub fn with_objects(objects: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, content) in objects {
            store.insert(key, content);
        }
        store
    }

    pub fn insert(&self, key: &str, content: &str) {
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body: Bytes::from(content.to_string()),
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    /// Make the next `times` operations touching `key` fail with `error`.
    pub fn fail_next(&self, key: &str, error: StoreError, times: usize) {
        let mut failures = self.failures.lock().unwrap();
        let queue = failures.entry(key.to_string()).or_default();
        for _ in 0..times {
            queue.push_back(error.clone());
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn content(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| String::from_utf8_lossy(&o.body).into_owned())
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|o| o.content_type.clone())
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.log.lock().unwrap().clone()
    }

    /// Keys uploaded, in call order (retries included).
    pub fn puts(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                StoreOp::Put(key) => Some(key),
                _ => None,
            })
            .collect()
    }

    /// Keys passed to delete calls, flattened.
    pub fn deletes(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                StoreOp::Delete(keys) => Some(keys),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Number of put or delete calls.
    pub fn file_ops(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| !matches!(op, StoreOp::List(_)))
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, op: StoreOp) {
        self.log.lock().unwrap().push(op);
    }

    fn take_failure(&self, key: &str) -> Option<StoreError> {
        self.failures
            .lock()
            .unwrap()
            .get_mut(key)
            .and_then(VecDeque::pop_front)
    }

    async fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, bucket: &BucketName) -> Result<Vec<RemoteObject>, StoreError> {
        self.record(StoreOp::List(bucket.to_string()));
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|(key, object)| RemoteObject {
                key: key.clone(),
                size: object.body.len() as u64,
                etag: Some(format!("{:x}", md5::compute(&object.body))),
            })
            .collect())
    }

    async fn put_object(
        &self,
        _bucket: &BucketName,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.record(StoreOp::Put(key.to_string()));
        self.enter().await;
        let result = match self.take_failure(key) {
            Some(error) => Err(error),
            None => {
                self.objects.lock().unwrap().insert(
                    key.to_string(),
                    StoredObject {
                        body,
                        content_type: content_type.to_string(),
                    },
                );
                Ok(())
            }
        };
        self.leave();
        result
    }

    async fn delete_objects(
        &self,
        _bucket: &BucketName,
        keys: &[String],
    ) -> Result<(), StoreError> {
        self.record(StoreOp::Delete(keys.to_vec()));
        self.enter().await;

        let mut rejected = Vec::new();
        for key in keys {
            match self.take_failure(key) {
                Some(StoreError::Transient(message)) => {
                    self.leave();
                    return Err(StoreError::Transient(message));
                }
                Some(error) => rejected.push(RejectedKey {
                    key: key.clone(),
                    reason: error.to_string(),
                }),
                None => {
                    self.objects.lock().unwrap().remove(key);
                }
            }
        }

        self.leave();
        if rejected.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Rejected(rejected))
        }
    }
}

/// CDN that records invalidation requests.
#[derive(Default)]
pub struct RecordingCdn {
    invalidations: Mutex<Vec<(String, Vec<String>)>>,
    fail: Mutex<Option<CdnError>>,
}

impl RecordingCdn {
    pub fn failing(error: CdnError) -> Self {
        Self {
            fail: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.invalidations.lock().unwrap().len()
    }

    pub fn invalidations(&self) -> Vec<(String, Vec<String>)> {
        self.invalidations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Cdn for RecordingCdn {
    async fn create_invalidation(
        &self,
        distribution: &DistributionId,
        paths: &[String],
    ) -> Result<InvalidationId, CdnError> {
        if let Some(error) = self.fail.lock().unwrap().clone() {
            return Err(error);
        }
        let mut invalidations = self.invalidations.lock().unwrap();
        invalidations.push((distribution.to_string(), paths.to_vec()));
        Ok(InvalidationId::new(format!("I{}", invalidations.len())))
    }
}

/// Output store backed by a map that tests can change between calls.
#[derive(Default)]
pub struct MemoryOutputs {
    values: Mutex<HashMap<String, String>>,
    reads: AtomicUsize,
}

impl MemoryOutputs {
    pub fn with(values: &[(&str, &str)]) -> Self {
        let outputs = Self::default();
        for (key, value) in values {
            outputs.set(key, value);
        }
        outputs
    }

    pub fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutputStore for MemoryOutputs {
    async fn get(&self, key: &str) -> Result<Option<String>, OutputError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.lock().unwrap().get(key).cloned())
    }
}
