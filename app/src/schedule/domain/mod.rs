#![allow(async_fn_in_trait)]

mod check;
mod keywords;
mod resolver;
mod summary;

use serde::{Deserialize, Serialize};

use crate::core::time::Date;

pub use check::{AvailabilityCheck, check_availability_at};
pub use keywords::is_scheduling_query;
pub use resolver::{ResolvedRange, resolve_range};
pub use summary::{AvailabilitySummary, DayAvailability};

#[cfg(test)]
pub use resolver::RangeRule;
#[cfg(test)]
pub use summary::NO_EVENTS_TEXT;

/// Interval on a day during which a user is unavailable. Owned by the
/// calendar service, times are kept as delivered (`HH:mm`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyBlock {
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BusyBlock {
    pub fn new(start_time: &str, end_time: &str) -> Self {
        Self {
            start_time: start_time.to_owned(),
            end_time: end_time.to_owned(),
            summary: None,
        }
    }
}

pub trait BusyBlockSource {
    async fn busy_blocks(&self, username: &str, date: &Date) -> anyhow::Result<Vec<BusyBlock>>;
}
