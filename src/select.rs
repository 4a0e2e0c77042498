//! RFC 2782 ordering of SRV records into connection targets.

use std::collections::BTreeMap;

use rand::Rng;

use crate::{record::Target, SrvRecord};

/// A source of uniformly distributed integers.
///
/// Every [`rand::Rng`] is one; tests can supply a scripted sequence instead.
pub trait RandomSource {
    /// Draws an integer uniformly from `[0, bound)`. `bound` is never zero.
    fn draw(&mut self, bound: u64) -> u64;
}

impl<R: Rng> RandomSource for R {
    fn draw(&mut self, bound: u64) -> u64 {
        self.random_range(0..bound)
    }
}

/// Orders SRV records into the sequence of targets a client should try.
///
/// Priorities are drained in ascending order. Within a priority, candidates
/// are arranged by `(weight, target)` so zero-weight records come first, then
/// drawn one at a time: with `total = 1 + sum(weights)` and `r` drawn from
/// `[0, total)`, the first candidate whose running weight sum is `>= r` goes
/// next. A draw happens for every pick, including the last one of a group.
///
/// Calling this twice over the same records may give different orders.
pub fn order<Record, Source>(records: &[Record], rng: &mut Source) -> Vec<Target>
where
    Record: SrvRecord,
    Source: RandomSource + ?Sized,
{
    let mut groups = BTreeMap::<u16, Vec<(String, &Record)>>::new();
    for record in records {
        groups
            .entry(record.priority())
            .or_default()
            .push((record.target().to_string(), record));
    }

    let mut targets = Vec::with_capacity(records.len());
    for (_priority, mut candidates) in groups {
        candidates.sort_by(|(a_name, a), (b_name, b)| {
            a.weight().cmp(&b.weight()).then_with(|| a_name.cmp(b_name))
        });

        while !candidates.is_empty() {
            let total = 1 + candidates
                .iter()
                .map(|(_, record)| u64::from(record.weight()))
                .sum::<u64>();
            let selector = rng.draw(total);

            let mut running = 0u64;
            let chosen = candidates
                .iter()
                .position(|(_, record)| {
                    running += u64::from(record.weight());
                    running >= selector
                })
                .unwrap_or(candidates.len() - 1);

            let (_, record) = candidates.remove(chosen);
            targets.push(record.to_target());
        }
    }

    #[cfg(feature = "log")]
    tracing::trace!(count = targets.len(), "ordered SRV targets");

    targets
}
