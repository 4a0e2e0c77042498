//! DNS resolvers.

use crate::{Name, RecordType, ResourceRecord};
use async_trait::async_trait;

#[cfg(feature = "hickory")]
mod hickory;

/// Represents the ability to answer DNS queries for DNS-SD browsing.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Errors encountered during resolution. They are handed back to callers
    /// untouched; nothing above a resolver retries or swallows them.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Gets the current records of type `rtype` at `name`.
    ///
    /// A name with no such records should produce an empty `Vec` rather
    /// than an error.
    async fn query(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, Self::Error>;
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    type Error = R::Error;

    async fn query(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, Self::Error> {
        (**self).query(name, rtype).await
    }
}
