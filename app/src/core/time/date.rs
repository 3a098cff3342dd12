use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

/// Calendar day in the user's local zone, without any time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Date {
    delegate: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Sunday = 0 .. Saturday = 6
    pub fn num_from_sunday(&self) -> u32 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl Date {
    pub fn new(delegate: NaiveDate) -> Self {
        Self { delegate }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> anyhow::Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::new)
            .with_context(|| format!("Invalid date {}-{}-{}", year, month, day))
    }

    pub fn today_in(tz: Tz) -> Self {
        Self::new(super::now_in(tz).date_naive())
    }

    pub fn weekday(&self) -> Weekday {
        self.delegate.weekday().into()
    }

    pub fn plus_days(&self, days: i64) -> Self {
        //failing only at the edges of what can be stored in a date
        let delegate = if days >= 0 {
            self.delegate.checked_add_days(chrono::Days::new(days as u64))
        } else {
            self.delegate.checked_sub_days(chrono::Days::new(days.unsigned_abs()))
        };

        Self::new(delegate.unwrap_or(self.delegate))
    }

    pub fn next_day(&self) -> Self {
        self.plus_days(1)
    }

    /// Next occurrence of `target` strictly after this date (1 to 7 days ahead).
    pub fn next_weekday_after(&self, target: Weekday) -> Self {
        let current = self.weekday().num_from_sunday() as i64;
        let mut days_to_add = target.num_from_sunday() as i64 - current;

        if days_to_add <= 0 {
            days_to_add += 7;
        }

        self.plus_days(days_to_add)
    }

    pub fn first_of_month(&self) -> Self {
        Self::new(self.delegate.with_day(1).unwrap_or(self.delegate))
    }

    pub fn first_of_next_month(&self) -> Self {
        let first = self.first_of_month().delegate;
        Self::new(first.checked_add_months(chrono::Months::new(1)).unwrap_or(first))
    }

    pub fn last_of_month(&self) -> Self {
        self.first_of_next_month().plus_days(-1)
    }

    pub fn to_iso_string(&self) -> String {
        self.delegate.format("%Y-%m-%d").to_string()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl FromStr for Date {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::new)
            .with_context(|| format!("Error parsing date {}", s))
    }
}
