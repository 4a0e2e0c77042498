//! TTL-respecting cache of DNS lookups.

use crate::{resolver::Resolver, Name, RecordType, ResourceRecord};
use arc_swap::ArcSwap;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Gets the current instant.
    fn now(&self) -> Instant;
}

/// [`Clock`] reading [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Identity of a cached lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Name queried.
    pub name: Name,
    /// Record type queried.
    pub rtype: RecordType,
}

/// Records returned by one lookup, along with when they stop being valid.
#[derive(Debug)]
pub struct CacheEntry {
    records: Vec<ResourceRecord>,
    valid_until: Instant,
}

impl CacheEntry {
    /// Creates an entry expiring with the shortest-lived record. Returns
    /// `None` for an empty record set, which is never cached.
    pub fn new(records: Vec<ResourceRecord>, now: Instant) -> Option<Self> {
        let min_ttl = records.iter().map(|record| record.ttl).min()?;
        Some(Self {
            records,
            valid_until: now + Duration::from_secs(min_ttl.into()),
        })
    }

    /// The cached records.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// When the entry expires.
    pub fn valid_until(&self) -> Instant {
        self.valid_until
    }

    /// Whether the entry may still be served at `now`.
    pub fn valid_at(&self, now: Instant) -> bool {
        now < self.valid_until
    }
}

/// Memoizes [`Resolver`] lookups per `(name, type)` for as long as the
/// returned records' TTLs allow.
///
/// Entries are immutable and replaced wholesale, so readers never see a
/// half-written entry. Two concurrent misses on the same key may both query;
/// whichever stores last wins. There is no negative caching: an empty answer
/// evicts whatever was cached for the key.
///
/// Stale entries are only replaced or evicted when their key is looked up
/// again, so the cache holds one entry per distinct key ever queried.
#[derive(Debug)]
pub struct ResolutionCache<R, C = SystemClock> {
    resolver: R,
    clock: C,
    entries: ArcSwap<HashMap<CacheKey, Arc<CacheEntry>>>,
}

impl<R> ResolutionCache<R> {
    /// Creates an empty cache in front of `resolver`.
    pub fn new(resolver: R) -> Self {
        Self::with_clock(resolver, SystemClock)
    }
}

impl<R, C> ResolutionCache<R, C> {
    /// Creates an empty cache in front of `resolver`, telling time with `clock`.
    pub fn with_clock(resolver: R, clock: C) -> Self {
        Self {
            resolver,
            clock,
            entries: Default::default(),
        }
    }

    /// The resolver queried on cache misses.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// When the entry for `(name, rtype)` expires, if there is one. The
    /// instant may already have passed. Never queries the resolver.
    pub fn expiry_of(&self, name: &Name, rtype: RecordType) -> Option<Instant> {
        let key = CacheKey {
            name: name.clone(),
            rtype,
        };
        self.entries.load().get(&key).map(|entry| entry.valid_until())
    }

    pub(crate) fn into_parts(self) -> (R, C) {
        (self.resolver, self.clock)
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    fn store(&self, key: CacheKey, entry: Arc<CacheEntry>) {
        self.entries.rcu(|entries| {
            let mut entries = HashMap::clone(entries);
            entries.insert(key.clone(), Arc::clone(&entry));
            entries
        });
    }

    fn evict(&self, key: &CacheKey) {
        if !self.entries.load().contains_key(key) {
            return;
        }
        self.entries.rcu(|entries| {
            let mut entries = HashMap::clone(entries);
            entries.remove(key);
            entries
        });
    }
}

impl<R: Resolver, C: Clock> ResolutionCache<R, C> {
    /// Gets the records of type `rtype` at `name`, from the cache if a live
    /// entry exists and from the resolver otherwise.
    ///
    /// The returned records are a copy; changing them does not touch the
    /// cache. Resolver errors are returned as-is and leave the cache alone.
    pub async fn lookup(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, R::Error> {
        let key = CacheKey {
            name: name.clone(),
            rtype,
        };
        let now = self.clock.now();

        let cached = self
            .entries
            .load()
            .get(&key)
            .filter(|entry| entry.valid_at(now))
            .map(|entry| entry.records().to_vec());
        if let Some(records) = cached {
            #[cfg(feature = "log")]
            tracing::trace!(%name, %rtype, "cache hit");
            return Ok(records);
        }

        #[cfg(feature = "log")]
        tracing::trace!(%name, %rtype, "cache miss");

        let records = self.resolver.query(name, rtype).await?;

        match CacheEntry::new(records.clone(), now) {
            Some(entry) => {
                #[cfg(feature = "log")]
                tracing::debug!(
                    %name,
                    %rtype,
                    count = records.len(),
                    valid_for = ?entry.valid_until().saturating_duration_since(now),
                    "caching records"
                );
                self.store(key, Arc::new(entry));
            }
            None => {
                #[cfg(feature = "log")]
                tracing::debug!(%name, %rtype, "no records, evicting");
                self.evict(&key);
            }
        }

        Ok(records)
    }
}
