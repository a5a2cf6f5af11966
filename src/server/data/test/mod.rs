use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::server::{
    data::{CalendarFileRepository, IndexRepository},
    error::AppError,
    model::index::TrackedEvent,
};
