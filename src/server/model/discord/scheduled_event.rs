use chrono::{DateTime, Utc};
use serde::Deserialize;
use serenity::all::{ChannelId, GuildId, ScheduledEventId};

use super::RecurrenceRule;

/// A guild scheduled event as returned by
/// `GET /guilds/{guild_id}/scheduled-events/{event_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledEvent {
    pub id: ScheduledEventId,
    pub guild_id: GuildId,
    /// Voice or stage channel hosting the event, absent for external events.
    #[serde(default)]
    pub channel_id: Option<ChannelId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_start_time: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub entity_type: EntityType,
    #[serde(default)]
    pub entity_metadata: Option<EntityMetadata>,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl ScheduledEvent {
    /// Free-text location of an external event as entered, if it is not blank.
    pub fn location(&self) -> Option<&str> {
        self.entity_metadata
            .as_ref()
            .and_then(|meta| meta.location.as_deref())
            .filter(|location| !location.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityMetadata {
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum EventStatus {
    Scheduled,
    Active,
    Completed,
    Canceled,
    Other(u8),
}

impl From<u8> for EventStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Scheduled,
            2 => Self::Active,
            3 => Self::Completed,
            4 => Self::Canceled,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum EntityType {
    StageInstance,
    Voice,
    External,
    Other(u8),
}

impl From<u8> for EntityType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::StageInstance,
            2 => Self::Voice,
            3 => Self::External,
            other => Self::Other(other),
        }
    }
}
