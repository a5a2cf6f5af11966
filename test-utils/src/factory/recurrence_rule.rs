//! Factory for Discord recurrence rule payloads.

use chrono::{DateTime, Utc};
use serde_json::json;

/// Builder for a `recurrence_rule` object as returned by Discord.
///
/// Frequency codes follow Discord: 0 yearly, 1 monthly, 2 weekly, 3 daily.
/// Weekday codes run from 0 (Monday) to 6 (Sunday).
///
/// # Example
///
/// ```rust,ignore
/// let rule = RecurrenceRuleFactory::weekly(start).by_weekday(&[0, 2, 4]).build();
/// ```
pub struct RecurrenceRuleFactory {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    frequency: u8,
    interval: u32,
    by_weekday: Option<Vec<u8>>,
    by_n_weekday: Option<Vec<(i8, u8)>>,
    by_month: Option<Vec<u8>>,
    by_month_day: Option<Vec<u8>>,
    count: Option<u32>,
}

impl RecurrenceRuleFactory {
    /// Creates a rule with the given frequency code and an interval of 1.
    pub fn new(start: DateTime<Utc>, frequency: u8) -> Self {
        Self {
            start,
            end: None,
            frequency,
            interval: 1,
            by_weekday: None,
            by_n_weekday: None,
            by_month: None,
            by_month_day: None,
            count: None,
        }
    }

    /// Creates a weekly rule.
    pub fn weekly(start: DateTime<Utc>) -> Self {
        Self::new(start, 2)
    }

    /// Creates a monthly rule.
    pub fn monthly(start: DateTime<Utc>) -> Self {
        Self::new(start, 1)
    }

    pub fn interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn by_weekday(mut self, days: &[u8]) -> Self {
        self.by_weekday = Some(days.to_vec());
        self
    }

    /// Sets `by_n_weekday` from `(n, day)` pairs, e.g. `(2, 1)` for the second Tuesday.
    pub fn by_n_weekday(mut self, entries: &[(i8, u8)]) -> Self {
        self.by_n_weekday = Some(entries.to_vec());
        self
    }

    pub fn by_month(mut self, months: &[u8]) -> Self {
        self.by_month = Some(months.to_vec());
        self
    }

    pub fn by_month_day(mut self, days: &[u8]) -> Self {
        self.by_month_day = Some(days.to_vec());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Builds the JSON payload.
    pub fn build(self) -> serde_json::Value {
        json!({
            "start": self.start.to_rfc3339(),
            "end": self.end.map(|end| end.to_rfc3339()),
            "frequency": self.frequency,
            "interval": self.interval,
            "by_weekday": self.by_weekday,
            "by_n_weekday": self.by_n_weekday.map(|entries| {
                entries
                    .into_iter()
                    .map(|(n, day)| json!({ "n": n, "day": day }))
                    .collect::<Vec<_>>()
            }),
            "by_month": self.by_month,
            "by_month_day": self.by_month_day,
            "by_year_day": null,
            "count": self.count,
        })
    }
}
