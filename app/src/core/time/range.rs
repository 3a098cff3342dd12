use std::fmt::Display;

use super::Date;

/// Inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn single(day: Date) -> Self {
        Self::new(day, day)
    }

    pub fn start(&self) -> &Date {
        &self.start
    }

    pub fn end(&self) -> &Date {
        &self.end
    }

    pub fn contains(&self, day: &Date) -> bool {
        self.start <= *day && *day <= self.end
    }

    pub fn len(&self) -> usize {
        self.days().count()
    }

    pub fn days(&self) -> DateIterator {
        DateIterator {
            current: Some(self.start),
            end: self.end,
        }
    }
}

pub struct DateIterator {
    current: Option<Date>,
    end: Date,
}

impl Iterator for DateIterator {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        if current > self.end {
            self.current = None;
            return None;
        }

        let next = current.next_day();
        //plus_days saturates at the edge of the calendar
        self.current = if next > current { Some(next) } else { None };

        Some(current)
    }
}
