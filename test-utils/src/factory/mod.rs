//! Factory methods for creating test data.
//!
//! This module provides factories producing JSON payloads shaped like Discord's REST
//! responses and like the bot's on-disk index records. Tests feed these into the code
//! under test through `serde_json::from_value`, the same path real responses take.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let event = factory::scheduled_event::create_scheduled_event(1, 100);
//!
//! // Customize with the builder
//! let event = factory::scheduled_event::ScheduledEventFactory::new(1, 100)
//!     .name("Board game night")
//!     .location("221B Baker St, London")
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `scheduled_event` - Discord guild scheduled event payloads
//! - `recurrence_rule` - Discord recurrence rule payloads
//! - `index` - Per-user index records

pub mod helpers;
pub mod index;
pub mod recurrence_rule;
pub mod scheduled_event;
