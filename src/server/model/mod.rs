//! Server-side domain models.
//!
//! This module contains the models flowing through the service layer: Discord REST
//! payloads as they arrive, the calendar events derived from them, and the per-user
//! index records persisted by the data layer.

pub mod api;
pub mod discord;
pub mod feed;
pub mod index;
