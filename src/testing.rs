//! Fixtures shared by the unit tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;

use crate::{
    record::{Ptr, Srv, Txt},
    resolver::Resolver,
    select::RandomSource,
    Clock, Name, RecordType, ResourceRecord,
};

/// Draws from a fixed script of `(expected bound, value)` pairs.
pub struct Scripted {
    draws: VecDeque<(u64, u64)>,
}

impl Scripted {
    pub fn new(draws: impl IntoIterator<Item = (u64, u64)>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn assert_exhausted(&self) {
        assert!(self.draws.is_empty(), "unused draws: {:?}", self.draws);
    }
}

impl RandomSource for Scripted {
    fn draw(&mut self, bound: u64) -> u64 {
        let (expected, value) = self.draws.pop_front().expect("ran out of scripted draws");
        assert_eq!(bound, expected, "unexpected draw width");
        value
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mock transport failure")]
pub struct MockError;

/// Serves canned records and counts the queries made.
#[derive(Default)]
pub struct MockResolver {
    zone: Mutex<HashMap<(Name, RecordType), Vec<ResourceRecord>>>,
    failing: Mutex<bool>,
    queries: AtomicUsize,
    log: Mutex<Vec<(Name, RecordType)>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the records served for `(name, rtype)`.
    pub fn set(&self, name: &str, rtype: RecordType, records: Vec<ResourceRecord>) {
        self.zone
            .lock()
            .unwrap()
            .insert((name.parse().unwrap(), rtype), records);
    }

    pub fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> Vec<(Name, RecordType)> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolver for MockResolver {
    type Error = MockError;

    async fn query(
        &self,
        name: &Name,
        rtype: RecordType,
    ) -> Result<Vec<ResourceRecord>, Self::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push((name.clone(), rtype));
        if *self.failing.lock().unwrap() {
            return Err(MockError);
        }
        Ok(self
            .zone
            .lock()
            .unwrap()
            .get(&(name.clone(), rtype))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn ptr(owner: &str, ttl: u32, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        owner.parse().unwrap(),
        ttl,
        Ptr {
            target: target.parse().unwrap(),
        },
    )
}

pub fn ptr_to(owner: &str, ttl: u32, target: Name) -> ResourceRecord {
    ResourceRecord::new(owner.parse().unwrap(), ttl, Ptr { target })
}

pub fn srv(owner: &str, ttl: u32, priority: u16, weight: u16, port: u16, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        owner.parse().unwrap(),
        ttl,
        Srv {
            priority,
            weight,
            port,
            target: target.parse().unwrap(),
        },
    )
}

pub fn txt(owner: &str, ttl: u32, strings: &[&str]) -> ResourceRecord {
    ResourceRecord::new(
        owner.parse().unwrap(),
        ttl,
        Txt {
            strings: strings.iter().map(|s| s.as_bytes().to_vec()).collect(),
        },
    )
}
