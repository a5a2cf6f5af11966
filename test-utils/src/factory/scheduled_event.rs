//! Factory for Discord guild scheduled event payloads.
//!
//! Produces JSON matching `GET /guilds/{guild_id}/scheduled-events/{event_id}` so tests
//! exercise the same deserialization path as live responses.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use crate::factory::helpers::next_id;

/// Factory for creating scheduled event payloads with customizable fields.
///
/// Defaults describe an external event with no location, starting 2030-01-07 18:00 UTC
/// and lasting two hours.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::scheduled_event::ScheduledEventFactory;
///
/// let event = ScheduledEventFactory::new(1, 100)
///     .name("Raid night")
///     .voice_channel(555)
///     .no_end()
///     .build();
/// ```
pub struct ScheduledEventFactory {
    guild_id: u64,
    event_id: u64,
    channel_id: Option<u64>,
    name: String,
    description: Option<String>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    status: u8,
    entity_type: u8,
    location: Option<String>,
    recurrence_rule: Option<serde_json::Value>,
}

impl ScheduledEventFactory {
    /// Creates a new factory with default values.
    ///
    /// # Arguments
    /// - `guild_id` - Guild owning the event
    /// - `event_id` - Scheduled event ID
    pub fn new(guild_id: u64, event_id: u64) -> Self {
        let start = default_start();
        Self {
            guild_id,
            event_id,
            channel_id: None,
            name: format!("Event {}", event_id),
            description: None,
            start,
            end: Some(start + Duration::hours(2)),
            status: 1,
            entity_type: 3,
            location: None,
            recurrence_rule: None,
        }
    }

    /// Creates a factory with a generated event ID.
    pub fn in_guild(guild_id: u64) -> Self {
        Self::new(guild_id, next_id())
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start time, keeping the current duration when an end is set.
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        if let Some(end) = self.end {
            self.end = Some(start + (end - self.start));
        }
        self.start = start;
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Removes the scheduled end time, as Discord allows for voice and stage events.
    pub fn no_end(mut self) -> Self {
        self.end = None;
        self
    }

    /// Sets the status code (1 scheduled, 2 active, 3 completed, 4 canceled).
    pub fn status(mut self, status: u8) -> Self {
        self.status = status;
        self
    }

    /// Makes this an external event at the given location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.entity_type = 3;
        self.channel_id = None;
        self.location = Some(location.into());
        self
    }

    /// Makes this a voice channel event.
    pub fn voice_channel(mut self, channel_id: u64) -> Self {
        self.entity_type = 2;
        self.channel_id = Some(channel_id);
        self.location = None;
        self
    }

    /// Attaches a recurrence rule built with `RecurrenceRuleFactory`.
    pub fn recurrence_rule(mut self, rule: serde_json::Value) -> Self {
        self.recurrence_rule = Some(rule);
        self
    }

    /// Builds the JSON payload.
    pub fn build(self) -> serde_json::Value {
        let entity_metadata = self
            .location
            .map(|location| json!({ "location": location }));

        json!({
            "id": self.event_id.to_string(),
            "guild_id": self.guild_id.to_string(),
            "channel_id": self.channel_id.map(|id| id.to_string()),
            "creator_id": "100000000000000000",
            "name": self.name,
            "description": self.description,
            "scheduled_start_time": self.start.to_rfc3339(),
            "scheduled_end_time": self.end.map(|end| end.to_rfc3339()),
            "privacy_level": 2,
            "status": self.status,
            "entity_type": self.entity_type,
            "entity_id": null,
            "entity_metadata": entity_metadata,
            "user_count": 3,
            "image": null,
            "recurrence_rule": self.recurrence_rule,
        })
    }
}

/// Creates a scheduled event payload with default values.
pub fn create_scheduled_event(guild_id: u64, event_id: u64) -> serde_json::Value {
    ScheduledEventFactory::new(guild_id, event_id).build()
}

/// Default start time used by the factory, 2030-01-07 18:00 UTC (a Monday).
pub fn default_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 7, 18, 0, 0)
        .single()
        .expect("default start is a valid UTC timestamp")
}
