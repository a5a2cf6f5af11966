//! Service layer for business logic and orchestration.
//!
//! This module sits between the entry points (HTTP controllers, bot handlers, the
//! scheduler) and the data layer. Services are responsible for:
//!
//! - **Discord access**: Fetching scheduled events through the `EventSource` seam
//! - **Calendar building**: Converting events and rendering per-user feeds
//! - **Subscriptions**: Mutating user indexes in response to Discord activity

pub mod calendar;
pub mod discord;
pub mod subscription;

#[cfg(test)]
pub(crate) mod test;
