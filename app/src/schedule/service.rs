use infrastructure::meter;

use crate::core::time::{Date, DateRange, Time};

use super::domain::{
    AvailabilityCheck, AvailabilitySummary, BusyBlockSource, DayAvailability, ResolvedRange, check_availability_at,
    is_scheduling_query, resolve_range,
};

/// Resolved range of a scheduling query together with the busy blocks found in it.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    pub resolved: ResolvedRange,
    pub summary: AvailabilitySummary,
}

#[derive(Debug, Clone)]
pub struct AvailabilityService<S: BusyBlockSource> {
    source: S,
}

impl<S: BusyBlockSource> AvailabilityService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns `None` if the query shows no scheduling intent.
    #[tracing::instrument(skip(self))]
    pub async fn scheduling_context(&self, username: &str, today: Date, query: &str) -> Option<SchedulingContext> {
        if !is_scheduling_query(query) {
            return None;
        }

        let resolved = resolve_range(today, query);
        meter::increment("scheduling_query", &[("rule", resolved.rule.label())]);
        if resolved.is_fallback() {
            tracing::info!("No date phrase recognized in scheduling query, using {}", resolved.range);
            meter::increment("scheduling_range_fallback", &[]);
        } else {
            tracing::debug!("Resolved {:?} to {}", resolved.rule, resolved.range);
        }

        let summary = self.summarize(username, &resolved.range).await;

        Some(SchedulingContext { resolved, summary })
    }

    /// Looks up every day of the range one after another. A failed lookup
    /// counts as a day without events.
    #[tracing::instrument(skip(self))]
    pub async fn summarize(&self, username: &str, range: &DateRange) -> AvailabilitySummary {
        meter::set("scheduling_range_days", range.len() as f64, &[]);

        let mut days = vec![];

        for date in range.days() {
            match self.source.busy_blocks(username, &date).await {
                Ok(blocks) if !blocks.is_empty() => {
                    tracing::debug!("Found {} busy blocks on {}", blocks.len(), date);
                    days.push(DayAvailability { date, blocks });
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Error looking up busy blocks of {} on {}: {:?}", username, date, e);
                    meter::increment("calendar_lookup_failed", &[]);
                }
            }
        }

        AvailabilitySummary::new(days)
    }

    #[tracing::instrument(skip(self))]
    pub async fn check_availability(&self, username: &str, date: &Date, at: Time) -> anyhow::Result<AvailabilityCheck> {
        let blocks = self.source.busy_blocks(username, date).await?;
        Ok(check_availability_at(&blocks, at))
    }
}
