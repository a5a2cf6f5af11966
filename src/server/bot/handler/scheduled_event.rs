//! Scheduled event lifecycle handlers.
//!
//! Each handler delegates to `SubscriptionService` and only logs failures, so a broken
//! index or an unreachable Discord API never takes the gateway task down.

use chrono_tz::Tz;
use serenity::all::{
    Context, CreateMessage, GuildScheduledEventUserAddEvent, GuildScheduledEventUserRemoveEvent,
    ScheduledEvent, UserId,
};

use crate::server::{
    data::IndexRepository,
    model::feed::FeedEvent,
    service::subscription::SubscriptionService,
    state::AppState,
    util::url::feed_url,
};

/// Adds the event to the user's feed when they mark it Interested.
///
/// With `NOTIFY_ON_INTEREST` enabled the user is also sent a DM naming the event and
/// linking their feed.
pub async fn handle_user_add(
    state: &AppState,
    ctx: Context,
    subscribed: GuildScheduledEventUserAddEvent,
) {
    let user_id = subscribed.user_id.get();
    let guild_id = subscribed.guild_id.get();
    let event_id = subscribed.scheduled_event_id.get();

    let added = match SubscriptionService::new(state)
        .add_interest(user_id, guild_id, event_id)
        .await
    {
        Ok(added) => added,
        Err(e) => {
            tracing::error!(
                "Failed to add event {} for user {}: {}",
                event_id,
                user_id,
                e
            );
            return;
        }
    };

    if !added || !state.config.notify_on_interest {
        return;
    }

    let snapshot = match IndexRepository::new(&state.config.data_dir).load(user_id).await {
        Ok(index) => index
            .into_iter()
            .find(|r| r.is(guild_id, event_id))
            .and_then(|r| r.snapshot),
        Err(e) => {
            tracing::error!("Failed loading index for user {}: {}", user_id, e);
            return;
        }
    };

    // The event could not be fetched yet, so there is nothing to describe
    let Some(event) = snapshot else {
        return;
    };

    let content = interest_message(
        &event,
        state.config.timezone,
        &feed_url(&state.config.base_url, user_id),
    );

    if let Err(e) = UserId::new(user_id)
        .direct_message(&ctx, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Cannot DM user {}: {}", user_id, e);
    }
}

/// Removes the event from the user's feed when they are no longer Interested.
pub async fn handle_user_remove(
    state: &AppState,
    _ctx: Context,
    unsubscribed: GuildScheduledEventUserRemoveEvent,
) {
    let user_id = unsubscribed.user_id.get();
    let event_id = unsubscribed.scheduled_event_id.get();

    if let Err(e) = SubscriptionService::new(state)
        .remove_interest(user_id, unsubscribed.guild_id.get(), event_id)
        .await
    {
        tracing::error!(
            "Failed to remove event {} for user {}: {}",
            event_id,
            user_id,
            e
        );
    }
}

/// Rebuilds every feed tracking an edited event.
pub async fn handle_update(state: &AppState, _ctx: Context, event: ScheduledEvent) {
    let guild_id = event.guild_id.get();
    let event_id = event.id.get();

    match SubscriptionService::new(state)
        .event_updated(guild_id, event_id)
        .await
    {
        Ok(users) => tracing::debug!(
            "Event {} updated, rebuilt {} calendars",
            event_id,
            users.len()
        ),
        Err(e) => tracing::error!("Failed to propagate update to event {}: {}", event_id, e),
    }
}

/// Removes a deleted event from every feed.
pub async fn handle_delete(state: &AppState, _ctx: Context, event: ScheduledEvent) {
    let guild_id = event.guild_id.get();
    let event_id = event.id.get();

    match SubscriptionService::new(state)
        .event_deleted(guild_id, event_id)
        .await
    {
        Ok(users) => tracing::debug!(
            "Event {} deleted, updated {} calendars",
            event_id,
            users.len()
        ),
        Err(e) => tracing::error!("Failed to propagate deletion of event {}: {}", event_id, e),
    }
}

/// DM confirming an event was added to the user's feed, with the start in `timezone`.
pub fn interest_message(event: &FeedEvent, timezone: Tz, feed_url: &str) -> String {
    let start = event.start.with_timezone(&timezone);

    format!(
        "Added **{}** ({}) to your feed: {}",
        event.summary,
        start.format("%a %-d %b %Y, %H:%M %Z"),
        feed_url
    )
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};

    use crate::server::model::feed::FeedEventStatus;

    use super::*;

    fn feed_event() -> FeedEvent {
        let start = Utc.with_ymd_and_hms(2030, 1, 7, 18, 0, 0).unwrap();
        FeedEvent {
            uid: "100@discord-1".to_string(),
            summary: "Raid night".to_string(),
            description: String::new(),
            start,
            end: start + chrono::Duration::hours(2),
            location: None,
            geo: None,
            url: None,
            recurrence: Vec::new(),
            status: FeedEventStatus::Confirmed,
        }
    }

    /// Tests that the start time is shown in the configured zone.
    #[test]
    fn formats_start_in_timezone() {
        let message = interest_message(
            &feed_event(),
            chrono_tz::Europe::Berlin,
            "webcal://cal.example.org/cal/42.ics",
        );

        assert_eq!(
            message,
            "Added **Raid night** (Mon 7 Jan 2030, 19:00 CET) to your feed: webcal://cal.example.org/cal/42.ics"
        );
    }

    #[test]
    fn formats_start_in_utc() {
        let message = interest_message(&feed_event(), Tz::UTC, "webcal://x/cal/1.ics");

        assert!(message.contains("(Mon 7 Jan 2030, 18:00 UTC)"));
    }
}
