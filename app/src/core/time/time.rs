use std::fmt::Display;

use anyhow::Context;
use chrono::Timelike;

/// Wall-clock time of day as exchanged with the calendar service (`HH:mm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    delegate: chrono::NaiveTime,
}

impl Time {
    pub fn at(hour: u32, minute: u32) -> anyhow::Result<Self> {
        Ok(Self {
            delegate: chrono::NaiveTime::from_hms_opt(hour, minute, 0)
                .context(format!("Error parsing time {}:{}", hour, minute))?,
        })
    }

    pub fn parse(value: &str) -> anyhow::Result<Self> {
        let delegate = chrono::NaiveTime::parse_from_str(value.trim(), "%H:%M")
            .with_context(|| format!("Error parsing time {}", value))?;

        Ok(Self { delegate })
    }

    pub fn hour(&self) -> u32 {
        self.delegate.hour()
    }

    pub fn minute(&self) -> u32 {
        self.delegate.minute()
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.delegate.format("%H:%M"))
    }
}
