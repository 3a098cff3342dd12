use crate::core::time::{Date, DateRange, Weekday};

use super::keywords::QueryTokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRule {
    Tomorrow,
    ThisWeek,
    NextWeek,
    ThisMonth,
    NextMonth,
    Weekday { day: Weekday, next: bool },
    Fallback,
}

impl RangeRule {
    pub fn label(&self) -> &'static str {
        match self {
            RangeRule::Tomorrow => "tomorrow",
            RangeRule::ThisWeek => "this_week",
            RangeRule::NextWeek => "next_week",
            RangeRule::ThisMonth => "this_month",
            RangeRule::NextMonth => "next_month",
            RangeRule::Weekday { next: false, .. } => "weekday",
            RangeRule::Weekday { next: true, .. } => "next_weekday",
            RangeRule::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub range: DateRange,
    pub rule: RangeRule,
}

impl ResolvedRange {
    fn new(start: Date, end: Date, rule: RangeRule) -> Self {
        Self {
            range: DateRange::new(start, end),
            rule,
        }
    }

    /// True if no phrase of the query was recognized and the range is a guess.
    pub fn is_fallback(&self) -> bool {
        self.rule == RangeRule::Fallback
    }
}

/// Resolves the date range a scheduling query refers to, relative to `today`
/// in the user's zone. The first matching rule wins.
pub fn resolve_range(today: Date, query: &str) -> ResolvedRange {
    let tokens = QueryTokens::parse(query);

    if tokens.contains("tomorrow") {
        let tomorrow = today.next_day();
        return ResolvedRange::new(tomorrow, tomorrow, RangeRule::Tomorrow);
    }

    if tokens.contains_phrase(&["this", "week"]) {
        let days_until_saturday = 6 - today.weekday().num_from_sunday() as i64;
        return ResolvedRange::new(today, today.plus_days(days_until_saturday), RangeRule::ThisWeek);
    }

    if tokens.contains_phrase(&["next", "week"]) {
        let monday = today.next_weekday_after(Weekday::Monday);
        return ResolvedRange::new(monday, monday.plus_days(6), RangeRule::NextWeek);
    }

    if tokens.contains_phrase(&["this", "month"]) {
        return ResolvedRange::new(today, today.last_of_month(), RangeRule::ThisMonth);
    }

    if tokens.contains_phrase(&["next", "month"]) {
        let first = today.first_of_next_month();
        return ResolvedRange::new(first, first.last_of_month(), RangeRule::NextMonth);
    }

    if let Some(day) = Weekday::ALL.into_iter().find(|d| tokens.contains(d.name())) {
        let next = tokens.contains("next");
        let mut target = today.next_weekday_after(day);

        if next {
            target = target.plus_days(7);
        }

        return ResolvedRange::new(target, target, RangeRule::Weekday { day, next });
    }

    ResolvedRange::new(today, today, RangeRule::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date;

    fn keys(resolved: &ResolvedRange) -> (String, String) {
        (resolved.range.start().to_string(), resolved.range.end().to_string())
    }

    fn date_keys(resolved: &ResolvedRange) -> Vec<String> {
        resolved.range.days().map(|d| d.to_iso_string()).collect()
    }

    fn two_weeks_from(start: Date) -> impl Iterator<Item = Date> {
        DateRange::new(start, start.plus_days(13)).days()
    }

    #[test]
    fn test_tomorrow() {
        let resolved = resolve_range(date!(2024-06-10), "Am I free tomorrow at 3pm?");

        assert_eq!(resolved.rule, RangeRule::Tomorrow);
        assert_eq!(date_keys(&resolved), vec!["2024-06-11"]);
    }

    #[test]
    fn test_tomorrow_for_any_day() {
        for today in two_weeks_from(date!(2024-12-25)) {
            let resolved = resolve_range(today, "what about tomorrow");

            assert_eq!(resolved.range, DateRange::single(today.plus_days(1)));
        }
    }

    #[test]
    fn test_tomorrow_wins_over_other_phrases() {
        let resolved = resolve_range(date!(2024-06-10), "tomorrow or sometime this week?");

        assert_eq!(resolved.rule, RangeRule::Tomorrow);
    }

    #[test]
    fn test_this_week_ends_on_saturday() {
        for today in two_weeks_from(date!(2024-06-09)) {
            let resolved = resolve_range(today, "am I busy this week");

            assert_eq!(resolved.rule, RangeRule::ThisWeek);
            assert_eq!(resolved.range.start(), &today);
            assert_eq!(resolved.range.end().weekday(), Weekday::Saturday);
            assert!(resolved.range.len() <= 7);
        }
    }

    #[test]
    fn test_this_week_on_saturday_is_single_day() {
        let resolved = resolve_range(date!(2024-06-15), "this week");

        assert_eq!(keys(&resolved), ("2024-06-15".to_owned(), "2024-06-15".to_owned()));
    }

    #[test]
    fn test_next_week_from_monday() {
        let resolved = resolve_range(date!(2024-06-10), "what's my schedule next week");

        assert_eq!(resolved.rule, RangeRule::NextWeek);
        assert_eq!(keys(&resolved), ("2024-06-17".to_owned(), "2024-06-23".to_owned()));
    }

    #[test]
    fn test_next_week_from_sunday() {
        let resolved = resolve_range(date!(2024-06-16), "next week");

        assert_eq!(keys(&resolved), ("2024-06-17".to_owned(), "2024-06-23".to_owned()));
    }

    #[test]
    fn test_next_week_always_starts_on_a_future_monday() {
        for today in two_weeks_from(date!(2024-06-09)) {
            let resolved = resolve_range(today, "free next week?");

            assert_eq!(resolved.range.start().weekday(), Weekday::Monday);
            assert!(resolved.range.start() > &today);
            assert_eq!(resolved.range.len(), 7);
        }
    }

    #[test]
    fn test_this_month_in_leap_year() {
        let resolved = resolve_range(date!(2024-02-15), "this month");

        assert_eq!(resolved.rule, RangeRule::ThisMonth);
        assert_eq!(keys(&resolved), ("2024-02-15".to_owned(), "2024-02-29".to_owned()));
        assert_eq!(resolved.range.len(), 15);
    }

    #[test]
    fn test_next_month_rolls_over_year() {
        let resolved = resolve_range(date!(2024-12-20), "how does next month look");

        assert_eq!(resolved.rule, RangeRule::NextMonth);
        assert_eq!(keys(&resolved), ("2025-01-01".to_owned(), "2025-01-31".to_owned()));
    }

    #[test]
    fn test_next_month_from_end_of_january() {
        let resolved = resolve_range(date!(2023-01-31), "next month");

        assert_eq!(keys(&resolved), ("2023-02-01".to_owned(), "2023-02-28".to_owned()));
    }

    #[test]
    fn test_weekday_is_strictly_in_future() {
        let resolved = resolve_range(date!(2024-06-14), "are you available friday?");

        assert_eq!(
            resolved.rule,
            RangeRule::Weekday {
                day: Weekday::Friday,
                next: false
            }
        );
        assert_eq!(date_keys(&resolved), vec!["2024-06-21"]);
    }

    #[test]
    fn test_weekday_later_this_week() {
        let resolved = resolve_range(date!(2024-06-10), "meeting on wednesday");

        assert_eq!(date_keys(&resolved), vec!["2024-06-12"]);
    }

    #[test]
    fn test_next_weekday_adds_a_week() {
        for today in two_weeks_from(date!(2024-06-09)) {
            for day in Weekday::ALL {
                let query = format!("how about next {}", day.name());
                let resolved = resolve_range(today, &query);

                assert_eq!(resolved.range.start(), resolved.range.end());
                assert_eq!(resolved.range.start().weekday(), day);
                assert!(*resolved.range.start() >= today.plus_days(8));
                assert!(*resolved.range.start() < today.plus_days(15));
            }
        }
    }

    #[test]
    fn test_several_weekdays_pick_earliest_in_week_order() {
        let today = date!(2024-06-10);

        assert_eq!(date_keys(&resolve_range(today, "thursday or tuesday?")), vec!["2024-06-11"]);
        assert_eq!(date_keys(&resolve_range(today, "saturday, else sunday")), vec!["2024-06-16"]);
    }

    #[test]
    fn test_unrecognized_phrase_falls_back_to_today() {
        let resolved = resolve_range(date!(2024-06-10), "am I free?");

        assert!(resolved.is_fallback());
        assert_eq!(resolved.rule.label(), "fallback");
        assert_eq!(date_keys(&resolved), vec!["2024-06-10"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let today = date!(2024-06-10);

        for query in ["tomorrow", "this week", "next week", "this month", "next month", "next friday", "free?"] {
            assert_eq!(resolve_range(today, query), resolve_range(today, query));
        }
    }
}
