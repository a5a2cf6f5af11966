//! Application state shared by the HTTP server, the Discord bot and the scheduler.
//!
//! The state is initialized once during startup and then cloned into each consumer:
//! Axum's state extraction for request handlers, the bot's event handler, and the
//! feed refresh job.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::server::{config::Config, service::discord::EventSource};

/// Application state containing shared resources and dependencies.
///
/// All fields are reference-counted, so cloning is cheap and every clone sees the
/// same configuration, event source and index lock.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from the environment.
    pub config: Arc<Config>,

    /// Source of scheduled events, the Discord REST API in production.
    pub events: Arc<dyn EventSource>,

    /// Serialises every read-modify-write of a user index.
    ///
    /// Gateway callbacks, `/mycalendar` and the poller can all touch the same index
    /// concurrently; holding this lock around load, mutate, save and rebuild keeps
    /// one of them from clobbering another's write.
    pub index_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    /// - `config` - Loaded application configuration
    /// - `events` - Scheduled event source
    pub fn new(config: Config, events: Arc<dyn EventSource>) -> Self {
        Self {
            config: Arc::new(config),
            events,
            index_lock: Arc::new(Mutex::new(())),
        }
    }
}
