//! Factories for per-user index records.

use serde_json::json;

/// Creates a minimal index record, as written by the first versions of the bot.
///
/// # Arguments
/// - `guild_id` - Guild owning the event
/// - `event_id` - Scheduled event ID
///
/// # Returns
/// - `serde_json::Value` - `{"guild_id": .., "id": ..}`
pub fn tracked_event(guild_id: u64, event_id: u64) -> serde_json::Value {
    json!({ "guild_id": guild_id, "id": event_id })
}

/// Creates an index record carrying a sequence number but no snapshot.
pub fn tracked_event_with_sequence(
    guild_id: u64,
    event_id: u64,
    sequence: u32,
) -> serde_json::Value {
    json!({ "guild_id": guild_id, "id": event_id, "sequence": sequence })
}
