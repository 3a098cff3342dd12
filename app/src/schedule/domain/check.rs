use crate::core::time::Time;

use super::BusyBlock;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheck {
    pub is_available: bool,
    pub message: String,
}

impl AvailabilityCheck {
    fn available(message: impl Into<String>) -> Self {
        Self {
            is_available: true,
            message: message.into(),
        }
    }

    fn busy(message: impl Into<String>) -> Self {
        Self {
            is_available: false,
            message: message.into(),
        }
    }
}

/// Availability at a single time of day. A block covers `[start, end)`.
pub fn check_availability_at(blocks: &[BusyBlock], at: Time) -> AvailabilityCheck {
    let mut parsed: Vec<(Time, Time)> = blocks
        .iter()
        .filter_map(|b| match (Time::parse(&b.start_time), Time::parse(&b.end_time)) {
            (Ok(start), Ok(end)) => Some((start, end)),
            _ => {
                tracing::debug!("Ignoring busy block with unparseable times: {:?}", b);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        return AvailabilityCheck::available("No scheduled events for this day");
    }

    parsed.sort();

    if let Some((_, end)) = parsed.iter().find(|(start, end)| *start <= at && at < *end) {
        return AvailabilityCheck::busy(format!(
            "Not available at this time. Next available time is at {}",
            end
        ));
    }

    match parsed.iter().find(|(start, _)| *start > at) {
        Some((start, _)) => AvailabilityCheck::available(format!("Available until {}", start)),
        None => AvailabilityCheck::available("Available for the rest of the day"),
    }
}
