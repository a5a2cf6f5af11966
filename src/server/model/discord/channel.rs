use serde::Deserialize;

/// Subset of `GET /channels/{channel_id}` used to name voice and stage venues.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordChannel {
    #[serde(default)]
    pub name: Option<String>,
}
