use chrono::Utc;
use chrono_tz::Tz;
use tokio::task_local;

task_local! {
    pub static FIXED_NOW: chrono::DateTime<Utc>;
}

pub fn now() -> chrono::DateTime<Utc> {
    FIXED_NOW.try_with(|t| *t).unwrap_or_else(|_| Utc::now())
}

pub fn now_in(tz: Tz) -> chrono::DateTime<Tz> {
    now().with_timezone(&tz)
}
