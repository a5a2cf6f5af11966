//! Conversion of a Discord scheduled event into a calendar entry.

use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;

use crate::server::{
    model::{
        discord::{EventStatus, ScheduledEvent},
        feed::{FeedEvent, FeedEventStatus, Geo},
    },
    util::url::{discord_event_url, maps_search_url},
};

use super::recurrence::to_rrule;

const CHANNEL_LOCATION_PREFIX: &str = "Discord channel: ";

/// Longest description copied into a VEVENT, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

static LAT_LON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d{1,3}\.\d+),\s*(-?\d{1,3}\.\d+)\s*$").expect("valid coordinate regex")
});

/// Stable UID for an event, unique across guilds.
pub fn event_uid(guild_id: u64, event_id: u64) -> String {
    format!("{event_id}@discord-{guild_id}")
}

/// Channel whose name the location line needs, if any.
///
/// Only events without a free-text location fall back to their channel, so the
/// channel lookup is skipped for everything else.
pub fn channel_to_resolve(event: &ScheduledEvent) -> Option<u64> {
    match event.location() {
        Some(_) => None,
        None => event.channel_id.map(|id| id.get()),
    }
}

/// Channel label an earlier conversion wrote into LOCATION.
///
/// Used in place of a fresh name when the channel lookup fails, so a transient
/// error does not change the entry and bump its SEQUENCE.
pub fn previous_channel_label(previous: &FeedEvent) -> Option<&str> {
    previous
        .location
        .as_deref()?
        .strip_prefix(CHANNEL_LOCATION_PREFIX)
}

/// Converts a Discord scheduled event into a calendar entry.
///
/// # Arguments
/// - `event` - Event as fetched from Discord
/// - `channel_name` - Resolved name of `event.channel_id`, when it could be looked up
pub fn to_feed_event(event: &ScheduledEvent, channel_name: Option<&str>) -> FeedEvent {
    let guild_id = event.guild_id.get();
    let event_id = event.id.get();
    let start = event.scheduled_start_time;

    let mut feed_event = FeedEvent {
        uid: event_uid(guild_id, event_id),
        summary: event.name.clone(),
        description: truncate_description(event.description.as_deref().unwrap_or_default()),
        start,
        end: event
            .scheduled_end_time
            .unwrap_or_else(|| start + Duration::hours(1)),
        location: None,
        geo: None,
        url: None,
        recurrence: event.recurrence_rule.iter().map(to_rrule).collect(),
        status: match event.status {
            EventStatus::Canceled => FeedEventStatus::Cancelled,
            _ => FeedEventStatus::Confirmed,
        },
    };

    apply_location(&mut feed_event, event, channel_name);

    feed_event
}

fn apply_location(feed_event: &mut FeedEvent, event: &ScheduledEvent, channel_name: Option<&str>) {
    if let Some(location) = event.location() {
        feed_event.location = Some(location.to_string());

        if let Some(geo) = parse_geo(location) {
            feed_event.geo = Some(geo);
        } else if is_web_url(location) {
            feed_event.url = Some(location.to_string());
        } else {
            feed_event.url = Some(maps_search_url(location));
        }
    } else if let Some(channel_id) = event.channel_id {
        let label = match channel_name {
            Some(name) => name.to_string(),
            None => format!("id {}", channel_id),
        };
        feed_event.location = Some(format!("{CHANNEL_LOCATION_PREFIX}{label}"));
        feed_event.url = Some(discord_event_url(event.guild_id.get(), event.id.get()));
    }
}

/// Parses `"lat,lon"` coordinates, rejecting values outside the valid ranges.
pub fn parse_geo(location: &str) -> Option<Geo> {
    let captures = LAT_LON.captures(location)?;
    let latitude: f64 = captures[1].parse().ok()?;
    let longitude: f64 = captures[2].parse().ok()?;

    if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
        return None;
    }

    Some(Geo {
        latitude,
        longitude,
    })
}

fn is_web_url(location: &str) -> bool {
    location.starts_with("https://") || location.starts_with("http://")
}

fn truncate_description(description: &str) -> String {
    description
        .trim()
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
