//! Discord bot integration for tracking scheduled event interest.
//!
//! The bot listens to the guild scheduled event lifecycle on the gateway and keeps
//! each user's feed in sync: marking an event Interested adds it, withdrawing removes
//! it, and updates or deletions by the organiser are propagated to everyone tracking
//! the event. Users fetch their personal feed link with the `/mycalendar` command.
//!
//! The bot is initialized during startup and runs in a separate tokio task so it does
//! not block the HTTP server.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, required for guild scoped events
//! - `GUILD_SCHEDULED_EVENTS` - Scheduled event updates and Interested changes
//!
//! Neither intent is privileged.

pub mod command;
pub mod handler;
pub mod start;
