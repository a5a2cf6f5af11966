//! Discord REST payloads consumed by the calendar builder.
//!
//! Serenity's gateway models omit fields the feed depends on, such as recurrence
//! rules, so scheduled events are deserialized into these types straight from the
//! REST responses. IDs reuse Serenity's snowflake types.

pub mod channel;
pub mod recurrence_rule;
pub mod scheduled_event;

pub use channel::DiscordChannel;
pub use recurrence_rule::{Frequency, NWeekday, RecurrenceRule, Weekday};
pub use scheduled_event::{EntityMetadata, EntityType, EventStatus, ScheduledEvent};
