//! Per-user subscriptions to scheduled events.
//!
//! Every operation here holds the index lock from `AppState` for its whole
//! load-modify-save-rebuild cycle.

use tokio::sync::Mutex;

use crate::server::{
    config::Config,
    data::IndexRepository,
    error::AppError,
    model::index::TrackedEvent,
    service::{
        calendar::{CalendarService, RebuildSummary},
        discord::EventSource,
    },
    state::AppState,
};

pub struct SubscriptionService<'a> {
    config: &'a Config,
    events: &'a dyn EventSource,
    lock: &'a Mutex<()>,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            config: &state.config,
            events: state.events.as_ref(),
            lock: &state.index_lock,
        }
    }

    fn calendar(&self) -> CalendarService<'_> {
        CalendarService::new(self.config, self.events)
    }

    fn index_repo(&self) -> IndexRepository<'_> {
        IndexRepository::new(&self.config.data_dir)
    }

    /// Adds an event to a user's feed after they marked it Interested.
    ///
    /// # Returns
    /// - `Ok(true)` - The event was added and the feed rebuilt
    /// - `Ok(false)` - The event was already tracked, nothing changed
    /// - `Err(AppError)` - The index could not be read or written
    pub async fn add_interest(
        &self,
        user_id: u64,
        guild_id: u64,
        event_id: u64,
    ) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        let calendar = self.calendar();

        calendar.ensure_files(user_id).await?;

        let mut index = self.index_repo().load(user_id).await?;
        if index.iter().any(|r| r.is(guild_id, event_id)) {
            return Ok(false);
        }

        index.push(TrackedEvent::new(guild_id, event_id));
        self.index_repo().save(user_id, &index).await?;
        calendar.rebuild(user_id, index).await?;

        tracing::info!(
            "Added event {} to user {} and rebuilt calendar",
            event_id,
            user_id
        );

        Ok(true)
    }

    /// Removes an event from a user's feed after they withdrew their interest.
    ///
    /// # Returns
    /// - `Ok(true)` - The event was removed and the feed rebuilt
    /// - `Ok(false)` - The event was not tracked
    pub async fn remove_interest(
        &self,
        user_id: u64,
        guild_id: u64,
        event_id: u64,
    ) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;

        let index = self.index_repo().load(user_id).await?;
        let remaining: Vec<TrackedEvent> = index
            .iter()
            .filter(|r| !r.is(guild_id, event_id))
            .cloned()
            .collect();

        if remaining.len() == index.len() {
            return Ok(false);
        }

        self.index_repo().save(user_id, &remaining).await?;
        self.calendar().rebuild(user_id, remaining).await?;

        tracing::info!(
            "Removed event {} from user {} and rebuilt calendar",
            event_id,
            user_id
        );

        Ok(true)
    }

    /// Rebuilds every feed tracking an event that changed on Discord.
    ///
    /// # Returns
    /// - `Ok(users)` - Users whose feed was rebuilt
    pub async fn event_updated(&self, guild_id: u64, event_id: u64) -> Result<Vec<u64>, AppError> {
        let mut rebuilt = Vec::new();

        for user_id in self.index_repo().list_users().await? {
            let _guard = self.lock.lock().await;

            let Some(index) = self.load_or_skip(user_id).await else {
                continue;
            };
            if !index.iter().any(|r| r.is(guild_id, event_id)) {
                continue;
            }

            match self.calendar().rebuild(user_id, index).await {
                Ok(_) => {
                    tracing::info!(
                        "Rebuilt calendar for {} after update to event {}",
                        user_id,
                        event_id
                    );
                    rebuilt.push(user_id);
                }
                Err(e) => tracing::error!("Failed to rebuild calendar for {}: {}", user_id, e),
            }
        }

        Ok(rebuilt)
    }

    /// Removes a deleted event from every index tracking it and rebuilds those feeds.
    ///
    /// # Returns
    /// - `Ok(users)` - Users whose index contained the event
    pub async fn event_deleted(&self, guild_id: u64, event_id: u64) -> Result<Vec<u64>, AppError> {
        let mut affected = Vec::new();

        for user_id in self.index_repo().list_users().await? {
            let _guard = self.lock.lock().await;

            let Some(index) = self.load_or_skip(user_id).await else {
                continue;
            };
            let remaining: Vec<TrackedEvent> = index
                .iter()
                .filter(|r| !r.is(guild_id, event_id))
                .cloned()
                .collect();
            if remaining.len() == index.len() {
                continue;
            }

            let result = match self.index_repo().save(user_id, &remaining).await {
                Ok(()) => self.calendar().rebuild(user_id, remaining).await.map(|_| ()),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    tracing::info!(
                        "Removed deleted event {} from user {} and rebuilt calendar",
                        event_id,
                        user_id
                    );
                    affected.push(user_id);
                }
                Err(e) => tracing::error!("Failed to update calendar for {}: {}", user_id, e),
            }
        }

        Ok(affected)
    }

    /// Makes sure a user has a feed and that it reflects their current index.
    ///
    /// Used by `/mycalendar` before sending the link. Users without tracked events
    /// get an empty calendar and no rebuild.
    pub async fn prepare_feed(&self, user_id: u64) -> Result<RebuildSummary, AppError> {
        let _guard = self.lock.lock().await;
        let calendar = self.calendar();

        calendar.ensure_files(user_id).await?;

        let index = self.index_repo().load(user_id).await?;
        if index.is_empty() {
            return Ok(RebuildSummary::default());
        }

        calendar.rebuild(user_id, index).await
    }

    /// Rebuilds one user's feed from their stored index.
    pub async fn refresh(&self, user_id: u64) -> Result<RebuildSummary, AppError> {
        let _guard = self.lock.lock().await;
        let calendar = self.calendar();

        calendar.ensure_files(user_id).await?;
        let index = self.index_repo().load(user_id).await?;

        calendar.rebuild(user_id, index).await
    }

    /// Rebuilds every known user's feed.
    ///
    /// The lock is taken per user so gateway callbacks can interleave with a long
    /// refresh. A failure for one user is logged and does not stop the others.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of feeds rebuilt successfully
    /// - `Err(AppError::IoErr)` - The data directory could not be listed
    pub async fn refresh_all(&self) -> Result<usize, AppError> {
        let mut refreshed = 0;

        for user_id in self.index_repo().list_users().await? {
            match self.refresh(user_id).await {
                Ok(_) => refreshed += 1,
                Err(e) => tracing::error!("Failed to refresh calendar for {}: {}", user_id, e),
            }
        }

        Ok(refreshed)
    }

    async fn load_or_skip(&self, user_id: u64) -> Option<Vec<TrackedEvent>> {
        match self.index_repo().load(user_id).await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::error!("Failed loading index for user {}: {}", user_id, e);
                None
            }
        }
    }
}
