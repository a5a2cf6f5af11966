//! Background jobs.
//!
//! - `feed_refresh` - Rebuilds every feed on a fixed interval so edits missed by the
//!   gateway (downtime, dropped events) still reach calendar apps.

pub mod feed_refresh;
