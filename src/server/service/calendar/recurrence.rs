//! Translation of Discord recurrence rules into RFC 5545 RRULE values.

use crate::server::model::discord::RecurrenceRule;

/// Builds the RRULE value (without the `RRULE:` prefix) for a Discord recurrence rule.
///
/// Parts are emitted as FREQ, INTERVAL, BYMONTH, BYMONTHDAY, BYYEARDAY, BYDAY, COUNT,
/// UNTIL. An interval of 1 and empty lists are omitted. `by_weekday` takes precedence
/// over `by_n_weekday`; Discord never sends both.
pub fn to_rrule(rule: &RecurrenceRule) -> String {
    let mut parts = vec![format!("FREQ={}", rule.frequency.as_ics_str())];

    if rule.interval > 1 {
        parts.push(format!("INTERVAL={}", rule.interval));
    }
    if let Some(months) = non_empty(&rule.by_month) {
        parts.push(format!("BYMONTH={}", join(months)));
    }
    if let Some(days) = non_empty(&rule.by_month_day) {
        parts.push(format!("BYMONTHDAY={}", join(days)));
    }
    if let Some(days) = non_empty(&rule.by_year_day) {
        parts.push(format!("BYYEARDAY={}", join(days)));
    }

    if let Some(days) = non_empty(&rule.by_weekday) {
        let days: Vec<&str> = days.iter().map(|day| day.as_ics_str()).collect();
        parts.push(format!("BYDAY={}", days.join(",")));
    } else if let Some(entries) = non_empty(&rule.by_n_weekday) {
        let days: Vec<String> = entries
            .iter()
            .map(|entry| format!("{}{}", entry.n, entry.day.as_ics_str()))
            .collect();
        parts.push(format!("BYDAY={}", days.join(",")));
    }

    if let Some(count) = rule.count {
        parts.push(format!("COUNT={count}"));
    }
    if let Some(end) = rule.end {
        parts.push(format!("UNTIL={}", end.format("%Y%m%dT%H%M%SZ")));
    }

    parts.join(";")
}

fn non_empty<T>(values: &Option<Vec<T>>) -> Option<&[T]> {
    values.as_deref().filter(|values| !values.is_empty())
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
