use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use test_utils::context::TestContext;

use crate::server::{
    controller::feed::{get_feed, home},
    service::test::{test_state, FakeEventSource},
    state::AppState,
};

mod router;

fn state(test: &TestContext) -> AppState {
    test_state(test.data_dir(), Arc::new(FakeEventSource::new()))
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
