//! Event Feed Test Utils
//!
//! Provides shared testing utilities for the event feed bot. This crate offers a builder
//! pattern for creating test contexts backed by a temporary data directory, plus factories
//! producing Discord REST payloads for scheduled events.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding a data directory with user indexes
//! - **TestContext**: Test environment owning the temporary directory
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_rebuild() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_index(42, vec![factory::index::tracked_event(1, 100)])
//!         .build()?;
//!
//!     let dir = test.data_dir();
//!     // Run code against the seeded directory...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
