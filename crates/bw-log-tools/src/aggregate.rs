//! Summary aggregation: totals, per-level counts and unique identifier sets.

use crate::types::{LogRecord, Summary, ORDER_ID_KEY, USER_ID_KEY};

/// Running accumulator behind `Summary`.
///
/// Owned by whoever drives the fold; `finish` hands back the snapshot.
#[derive(Debug, Default)]
pub struct SummaryAggregator {
    summary: Summary,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the running counters.
    pub fn push(&mut self, record: &LogRecord) {
        let summary = &mut self.summary;
        summary.total_count += 1;
        *summary
            .level_counts
            .entry(record.level.clone())
            .or_default() += 1;

        if let Some(id) = record.context_value(USER_ID_KEY) {
            summary.unique_user_ids.insert(id.clone());
        }
        if let Some(id) = record.context_value(ORDER_ID_KEY) {
            summary.unique_order_ids.insert(id.clone());
        }
    }

    pub fn finish(self) -> Summary {
        self.summary
    }
}

/// Aggregate a full sequence of records into a `Summary`.
pub fn aggregate<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    let mut aggregator = SummaryAggregator::new();
    for record in records {
        aggregator.push(record);
    }
    aggregator.finish()
}
