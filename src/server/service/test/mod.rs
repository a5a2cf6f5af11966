//! Shared fixtures for service tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use serenity::async_trait;

use crate::server::{
    config::Config,
    error::AppError,
    model::discord::ScheduledEvent,
    service::discord::EventSource,
    state::AppState,
};

mod discord;
mod subscription;

/// In-memory `EventSource`.
///
/// Events are stored as the JSON payloads the factories produce and deserialized on
/// every fetch, so tests go through the same parsing as live responses. Events can be
/// replaced, removed or made to fail between calls to simulate changes on Discord.
#[derive(Default)]
pub struct FakeEventSource {
    events: Mutex<HashMap<(u64, u64), serde_json::Value>>,
    failing: Mutex<HashSet<(u64, u64)>>,
    channels: Mutex<HashMap<u64, String>>,
    failing_channels: Mutex<HashSet<u64>>,
    fetches: AtomicUsize,
}

impl FakeEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an event built with `ScheduledEventFactory`.
    pub fn with_event(self, payload: serde_json::Value) -> Self {
        self.put(payload);
        self
    }

    pub fn with_channel(self, channel_id: u64, name: &str) -> Self {
        self.channels
            .lock()
            .unwrap()
            .insert(channel_id, name.to_string());
        self
    }

    pub fn put(&self, payload: serde_json::Value) {
        let key = (id_field(&payload, "guild_id"), id_field(&payload, "id"));
        self.events.lock().unwrap().insert(key, payload);
    }

    pub fn remove(&self, guild_id: u64, event_id: u64) {
        self.events.lock().unwrap().remove(&(guild_id, event_id));
    }

    /// Makes fetches of an event fail as if Discord were unreachable.
    pub fn fail(&self, guild_id: u64, event_id: u64) {
        self.failing.lock().unwrap().insert((guild_id, event_id));
    }

    pub fn recover(&self, guild_id: u64, event_id: u64) {
        self.failing.lock().unwrap().remove(&(guild_id, event_id));
    }

    /// Makes lookups of a channel fail as if Discord were unreachable.
    pub fn fail_channel(&self, channel_id: u64) {
        self.failing_channels.lock().unwrap().insert(channel_id);
    }

    /// Number of `fetch_event` calls so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

fn id_field(payload: &serde_json::Value, field: &str) -> u64 {
    payload[field]
        .as_str()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("payload is missing {field}"))
}

fn unavailable(what: String) -> AppError {
    AppError::IoErr(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        format!("{what} is unavailable"),
    ))
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn fetch_event(
        &self,
        guild_id: u64,
        event_id: u64,
    ) -> Result<Option<ScheduledEvent>, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&(guild_id, event_id)) {
            return Err(unavailable(format!("event {event_id}")));
        }

        let payload = self
            .events
            .lock()
            .unwrap()
            .get(&(guild_id, event_id))
            .cloned();

        payload
            .map(|payload| serde_json::from_value(payload).map_err(AppError::from))
            .transpose()
    }

    async fn channel_name(&self, channel_id: u64) -> Result<Option<String>, AppError> {
        if self.failing_channels.lock().unwrap().contains(&channel_id) {
            return Err(unavailable(format!("channel {channel_id}")));
        }

        Ok(self.channels.lock().unwrap().get(&channel_id).cloned())
    }
}

/// Application state pointing at a temporary data directory and a fake source.
pub fn test_state(data_dir: &std::path::Path, events: Arc<FakeEventSource>) -> AppState {
    AppState::new(Config::test_default(data_dir), events)
}
