use crate::core::time::Date;

use super::BusyBlock;

pub const NO_EVENTS_TEXT: &str = "No scheduled events found for the requested period.";
const BANNER: &str = "Calendar information for the requested period:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: Date,
    pub blocks: Vec<BusyBlock>,
}

/// Busy blocks of every day in a resolved range that has at least one block,
/// in date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySummary {
    days: Vec<DayAvailability>,
}

impl AvailabilitySummary {
    pub fn new(days: Vec<DayAvailability>) -> Self {
        let mut days: Vec<DayAvailability> = days.into_iter().filter(|d| !d.blocks.is_empty()).collect();
        days.sort_by_key(|d| d.date);

        Self { days }
    }

    pub fn days(&self) -> &[DayAvailability] {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return NO_EVENTS_TEXT.to_owned();
        }

        let days = self
            .days
            .iter()
            .map(|day| {
                let lines = day
                    .blocks
                    .iter()
                    .map(|b| format!("- Busy from {} to {}", b.start_time, b.end_time))
                    .collect::<Vec<_>>()
                    .join("\n");

                format!("\n{}:\n{}", day.date, lines)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n{}", BANNER, days)
    }
}
