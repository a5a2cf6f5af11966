//! ICS rendering of a user's feed.

use chrono::Duration;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};

use crate::server::{
    config::Config,
    model::{feed::FeedEvent, index::TrackedEvent},
};

pub const PRODID: &str = "-//Discord Events ICS Feed//EN";
pub const CALENDAR_NAME: &str = "Discord Events";

/// Calendar-wide rendering settings.
#[derive(Debug, Clone)]
pub struct CalendarOptions {
    /// IANA zone published as `X-WR-TIMEZONE`.
    pub timezone: String,
    /// Suggested client refresh interval.
    pub refresh_minutes: u64,
    /// VALARM lead time, 0 for no alarm.
    pub alarm_minutes: u32,
}

impl From<&Config> for CalendarOptions {
    fn from(config: &Config) -> Self {
        Self {
            timezone: config.timezone.name().to_string(),
            refresh_minutes: config.poll_interval_minutes,
            alarm_minutes: config.alarm_minutes,
        }
    }
}

/// Renders every tracked event that has a snapshot into one calendar.
///
/// Records without a snapshot have never been fetched successfully and are skipped.
pub fn render_calendar(options: &CalendarOptions, entries: &[TrackedEvent]) -> String {
    let mut calendar = Calendar::new();

    calendar.append_property(Property::new("X-WR-CALNAME", CALENDAR_NAME));
    calendar.append_property(Property::new("X-WR-TIMEZONE", options.timezone.as_str()));

    let ttl = format!("PT{}M", options.refresh_minutes);
    let mut refresh = Property::new("REFRESH-INTERVAL", ttl.as_str());
    refresh.add_parameter("VALUE", "DURATION");
    calendar.append_property(refresh);
    calendar.append_property(Property::new("X-PUBLISHED-TTL", ttl.as_str()));

    for entry in entries {
        if let Some(event) = &entry.snapshot {
            calendar.push(to_ics_event(event, entry.sequence, options.alarm_minutes));
        }
    }

    normalize(&calendar.done().to_string())
}

fn to_ics_event(event: &FeedEvent, sequence: u32, alarm_minutes: u32) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.add_property("SEQUENCE", sequence.to_string());

    ics_event.starts(event.start);
    ics_event.ends(event.end);

    if !event.description.is_empty() {
        ics_event.description(&event.description);
    }

    if let Some(ref location) = event.location {
        ics_event.location(location);
    }

    if let Some(geo) = event.geo {
        ics_event.add_property("GEO", format!("{};{}", geo.latitude, geo.longitude));
    }

    if let Some(ref url) = event.url {
        ics_event.add_property("URL", url);
    }

    // RRULE may repeat, so each one is appended rather than set
    for rule in &event.recurrence {
        ics_event.append_multi_property(Property::new("RRULE", rule.as_str()));
    }

    ics_event.add_property("STATUS", event.status.as_ics_str());

    if alarm_minutes > 0 {
        let trigger = Trigger::before_start(Duration::minutes(i64::from(alarm_minutes)));
        ics_event.alarm(Alarm::display(&event.summary, trigger));
    }

    ics_event.done()
}

/// Replaces the library's PRODID and drops DTSTAMP/UID lines it adds inside VALARM.
fn normalize(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
