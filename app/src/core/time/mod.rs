#![allow(dead_code)]

mod clock;
mod date;
mod range;
mod time;

pub use clock::now_in;
pub use date::{Date, Weekday};
pub use range::DateRange;
pub use time::Time;

#[cfg(test)]
pub use clock::FIXED_NOW;

#[macro_export]
macro_rules! date {
    ($year:literal - $month:literal - $day:literal) => {{
        $crate::core::time::Date::from_ymd($year, $month, $day).unwrap()
    }};
}
