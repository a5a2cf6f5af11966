//! Calendar builder.
//!
//! Turns a user's index of tracked scheduled events into the `.ics` feed served over
//! HTTP. Each rebuild re-fetches every tracked event, converts it (`convert`), carries
//! its recurrence over (`recurrence`), bumps SEQUENCE when it changed, prunes events
//! Discord no longer knows, and renders the result (`ics`).
//!
//! `CalendarService` does not lock. Callers that read-modify-write an index go
//! through `SubscriptionService`, which serialises them.

pub mod convert;
pub mod ics;
pub mod recurrence;

#[cfg(test)]
mod test;

use std::collections::HashSet;

use crate::server::{
    config::Config,
    data::{CalendarFileRepository, IndexRepository},
    error::AppError,
    model::{discord::ScheduledEvent, feed::FeedEvent, index::TrackedEvent},
    service::discord::EventSource,
};

use self::ics::{render_calendar, CalendarOptions};

/// Outcome of rebuilding one feed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Events written to the feed.
    pub events: usize,
    /// Records dropped because Discord answered 404.
    pub pruned: usize,
    /// Records kept with their previous snapshot because the fetch failed.
    pub failed: usize,
}

pub struct CalendarService<'a> {
    config: &'a Config,
    events: &'a dyn EventSource,
}

impl<'a> CalendarService<'a> {
    pub fn new(config: &'a Config, events: &'a dyn EventSource) -> Self {
        Self { config, events }
    }

    /// Creates an empty index and an empty calendar for a user if they are missing.
    pub async fn ensure_files(&self, user_id: u64) -> Result<(), AppError> {
        let index_repo = IndexRepository::new(&self.config.data_dir);
        let calendar_repo = CalendarFileRepository::new(&self.config.data_dir);

        if !index_repo.exists(user_id).await? {
            tracing::info!("Creating new index file for user {}", user_id);
            index_repo.save(user_id, &[]).await?;
        }

        if !calendar_repo.exists(user_id).await? {
            tracing::info!("Creating new ICS feed file for user {}", user_id);
            calendar_repo
                .write(user_id, &render_calendar(&self.options(), &[]))
                .await?;
        }

        Ok(())
    }

    /// Rebuilds a user's feed from the given index.
    ///
    /// Every record is re-fetched. Found events refresh their snapshot, 404s are
    /// pruned, and other failures keep the record and its previous snapshot so the
    /// feed does not flap while Discord is unreachable. Duplicate records are
    /// collapsed. The index is saved only when it changed; the calendar is always
    /// rewritten.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the feed
    /// - `index` - The user's current index, as loaded by the caller
    ///
    /// # Returns
    /// - `Ok(RebuildSummary)` - Feed written
    /// - `Err(AppError::IoErr)` - Index or calendar could not be written
    pub async fn rebuild(
        &self,
        user_id: u64,
        index: Vec<TrackedEvent>,
    ) -> Result<RebuildSummary, AppError> {
        let mut summary = RebuildSummary::default();
        let mut seen = HashSet::new();
        let mut updated = Vec::with_capacity(index.len());

        for mut record in index.iter().cloned() {
            if !seen.insert((record.guild_id, record.id)) {
                continue;
            }

            match self.events.fetch_event(record.guild_id, record.id).await {
                Ok(Some(event)) => {
                    let feed_event = self.convert(&event, record.snapshot.as_ref()).await;
                    if record.record(feed_event) {
                        tracing::debug!(
                            "Event {} for user {} is now at sequence {}",
                            record.id,
                            user_id,
                            record.sequence
                        );
                    }
                    updated.push(record);
                }
                Ok(None) => {
                    tracing::info!(
                        "Event {} in guild {} no longer exists, dropping it from user {}",
                        record.id,
                        record.guild_id,
                        user_id
                    );
                    summary.pruned += 1;
                }
                Err(e) => {
                    tracing::error!("Fetching event {} failed: {}", record.id, e);
                    summary.failed += 1;
                    updated.push(record);
                }
            }
        }

        if updated != index {
            IndexRepository::new(&self.config.data_dir)
                .save(user_id, &updated)
                .await?;
        }

        summary.events = updated.iter().filter(|r| r.snapshot.is_some()).count();

        let calendar = render_calendar(&self.options(), &updated);
        CalendarFileRepository::new(&self.config.data_dir)
            .write(user_id, &calendar)
            .await?;

        tracing::info!("Saved .ics for {} ({} events)", user_id, summary.events);

        Ok(summary)
    }

    /// Converts a fetched event, resolving its channel name when the location needs it.
    ///
    /// A failed lookup falls back to the label in `previous`, the record's last
    /// snapshot, before falling back to the channel ID.
    async fn convert(&self, event: &ScheduledEvent, previous: Option<&FeedEvent>) -> FeedEvent {
        let channel_name = match convert::channel_to_resolve(event) {
            Some(channel_id) => match self.events.channel_name(channel_id).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Failed to look up channel {}: {}", channel_id, e);
                    previous
                        .and_then(convert::previous_channel_label)
                        .map(str::to_string)
                }
            },
            None => None,
        };

        convert::to_feed_event(event, channel_name.as_deref())
    }

    fn options(&self) -> CalendarOptions {
        CalendarOptions::from(self.config)
    }
}
