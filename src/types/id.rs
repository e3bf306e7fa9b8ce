// ABOUTME: Phantom-typed identifiers for provisioned resources.
// ABOUTME: Keeps bucket names, distribution ids, and invalidation ids from being swapped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// The kind of resource an [`Id`] refers to.
pub trait Resource {
    const KIND: &'static str;
}

pub enum Bucket {}
pub enum Distribution {}
pub enum Invalidation {}

impl Resource for Bucket {
    const KIND: &'static str = "BucketName";
}

impl Resource for Distribution {
    const KIND: &'static str = "DistributionId";
}

impl Resource for Invalidation {
    const KIND: &'static str = "InvalidationId";
}

/// An identifier read from provisioning outputs or returned by a provider.
///
/// A `BucketName` cannot be passed where a `DistributionId` is expected,
/// even though both are plain strings in the output store.
#[must_use = "IDs reference resources and should not be ignored"]
pub struct Id<R: Resource> {
    value: String,
    _resource: PhantomData<R>,
}

impl<R: Resource> Id<R> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _resource: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

// R is only a marker, so derives would demand needless bounds on it.

impl<R: Resource> fmt::Debug for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(R::KIND).field(&self.value).finish()
    }
}

impl<R: Resource> fmt::Display for Id<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<R: Resource> Clone for Id<R> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<R: Resource> PartialEq for Id<R> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<R: Resource> Eq for Id<R> {}

impl<R: Resource> Hash for Id<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<R: Resource> Serialize for Id<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, R: Resource> Deserialize<'de> for Id<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

pub type BucketName = Id<Bucket>;
pub type DistributionId = Id<Distribution>;
pub type InvalidationId = Id<Invalidation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_names_the_resource_kind() {
        assert_eq!(
            format!("{:?}", BucketName::new("site-bucket")),
            r#"BucketName("site-bucket")"#
        );
        assert_eq!(format!("{}", DistributionId::new("E2ABC")), "E2ABC");
    }
}
