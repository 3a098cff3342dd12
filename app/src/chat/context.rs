use chrono_tz::Tz;

use crate::schedule::AvailabilitySummary;

use super::ChatMessage;

/// Tells the model what "now" is for the user, e.g.
/// `Monday, June 10, 2024 at 03:05 PM CEST`.
pub fn date_context(now: &chrono::DateTime<Tz>) -> ChatMessage {
    ChatMessage::system(format!(
        "Current date and time in user's timezone ({}): {}",
        now.timezone().name(),
        now.format("%A, %B %-d, %Y at %I:%M %p %Z")
    ))
}

pub fn calendar_context(summary: &AvailabilitySummary) -> ChatMessage {
    ChatMessage::system(format!("Calendar availability information: \n{}", summary.to_text()))
}
