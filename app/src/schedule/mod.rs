mod adapter;
mod domain;
mod service;

pub use adapter::Calendar;
pub use domain::*;
pub use service::AvailabilityService;

#[cfg(test)]
pub use service::tests::FakeCalendar;
