//! Batch aggregation of certified applications into dimension counters.
//!
//! Records are drawn from the certified stream in fixed-size batches so
//! peak memory stays bounded by the batch size, independent of input
//! size. Batch size affects only memory and throughput, never the
//! resulting counts.

use std::collections::HashMap;

use crate::error::ReadResult;
use crate::reader::Application;

/// Records drawn per batch unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Occurrence counts for one tracked dimension.
#[derive(Debug, Default, Clone)]
pub struct DimensionCounts {
    counts: HashMap<String, u64>,
}

impl DimensionCounts {
    /// Count one occurrence of `value`.
    fn record(&mut self, value: String) {
        *self.counts.entry(value).or_insert(0) += 1;
    }

    /// Sum of all counts. Equals the number of certified applications.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct values seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The `limit` highest-count entries, ordered by descending count and,
    /// within equal counts, ascending value. The ordering is total, so the
    /// result never depends on hash or insertion order.
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(&str, u64)]) -> Self {
        let mut counts = Self::default();
        for &(value, count) in pairs {
            counts.counts.insert(value.to_string(), count);
        }
        counts
    }
}

/// Accumulates the two report dimensions over a certified-record stream.
#[derive(Debug)]
pub struct Aggregator {
    pub states: DimensionCounts,
    pub occupations: DimensionCounts,
    batch_size: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl Aggregator {
    pub fn new(batch_size: usize) -> Self {
        Self {
            states: DimensionCounts::default(),
            occupations: DimensionCounts::default(),
            batch_size: batch_size.max(1),
        }
    }

    /// Drain the record stream batch by batch, updating both counters.
    ///
    /// The first error from the stream aborts the run; counts accumulated
    /// so far are left in place but the caller gets the error.
    pub fn consume<I>(&mut self, mut records: I) -> ReadResult<u64>
    where
        I: Iterator<Item = ReadResult<Application>>,
    {
        let mut consumed = 0;
        loop {
            let batch = next_batch(&mut records, self.batch_size)?;
            if batch.is_empty() {
                return Ok(consumed);
            }
            consumed += batch.len() as u64;
            for app in batch {
                self.states.record(app.worksite_state);
                self.occupations.record(app.soc_name);
            }
        }
    }
}

/// Draw up to `size` records from the stream, propagating the first error.
fn next_batch<I>(records: &mut I, size: usize) -> ReadResult<Vec<Application>>
where
    I: Iterator<Item = ReadResult<Application>>,
{
    let mut batch = Vec::new();
    for item in records.by_ref().take(size) {
        batch.push(item?);
    }
    Ok(batch)
}
