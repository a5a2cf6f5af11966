//! Bot, feed server and calendar builder.
//!
//! The application watches Discord guild scheduled events on behalf of its users and
//! mirrors the events each user marked Interested into a personal `.ics` feed, which
//! calendar apps subscribe to over HTTP.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers for the homepage and feeds
//! - **Service Layer** (`service/`) - Discord access, calendar building and subscriptions
//! - **Data Layer** (`data/`) - Per-user JSON index and `.ics` files
//! - **Model Layer** (`model/`) - Discord payloads, feed events and index records
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (config, event source, index lock)
//! - **Startup** (`startup`) - HTTP client, data directory and listener setup
//! - **Router** (`router`) - Axum route configuration
//! - **Scheduler** (`scheduler/`) - Periodic rebuild of every feed
//! - **Bot** (`bot/`) - Discord gateway handlers and slash commands
//!
//! # Update Flow
//!
//! 1. **Bot** receives a scheduled event callback or `/mycalendar`
//! 2. **Subscription service** takes the index lock and updates the user's index
//! 3. **Calendar service** re-fetches the tracked events and converts them
//! 4. **Data** writes the index and the rendered feed atomically
//! 5. **Controller** serves the feed file to calendar apps

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
