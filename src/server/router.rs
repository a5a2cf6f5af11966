use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::server::{
    controller::feed::{get_feed, home},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD])
        .allow_origin(Any);

    Router::new()
        .route("/", get(home))
        .route("/cal/{file}", get(get_feed))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
