use serde::{Deserialize, Serialize};

use super::feed::FeedEvent;

/// One scheduled event tracked in a user's index.
///
/// Older index files only carry `guild_id` and `id`, so every other field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub guild_id: u64,
    #[serde(alias = "event_id")]
    pub id: u64,
    /// VEVENT SEQUENCE, bumped each time the snapshot changes.
    #[serde(default)]
    pub sequence: u32,
    /// Last successfully converted version of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<FeedEvent>,
}

impl TrackedEvent {
    pub fn new(guild_id: u64, id: u64) -> Self {
        Self {
            guild_id,
            id,
            sequence: 0,
            snapshot: None,
        }
    }

    pub fn is(&self, guild_id: u64, id: u64) -> bool {
        self.guild_id == guild_id && self.id == id
    }

    /// Stores a freshly converted event.
    ///
    /// The sequence is incremented when a previous snapshot exists and differs.
    ///
    /// # Returns
    /// - `true` - The snapshot was created or changed
    /// - `false` - The event is unchanged
    pub fn record(&mut self, event: FeedEvent) -> bool {
        match &self.snapshot {
            Some(previous) if *previous == event => false,
            Some(_) => {
                self.sequence += 1;
                self.snapshot = Some(event);
                true
            }
            None => {
                self.snapshot = Some(event);
                true
            }
        }
    }
}
