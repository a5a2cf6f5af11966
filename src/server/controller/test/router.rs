use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use tower::ServiceExt;

use crate::server::router::router;

use super::*;

const FEED: &str = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";

fn app(test: &TestContext) -> Router {
    router().with_state(state(test))
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, "https://calendar.example.com")
        .body(Body::empty())
        .unwrap()
}

/// Tests fetching a feed through the full router.
///
/// Expected: 200 with calendar headers, CORS header and the file contents
#[tokio::test]
async fn routes_feed_download() {
    let test = TestContext::new().unwrap();
    test.write_file("42.ics", FEED).unwrap();

    let response = app(&test)
        .oneshot(request(Method::GET, "/cal/42.ics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/calendar; charset=utf-8"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body_text(response).await, FEED);
}

/// Tests HEAD on the feed route.
///
/// Expected: 200 with the same headers and no body
#[tokio::test]
async fn answers_head_on_feed() {
    let test = TestContext::new().unwrap();
    test.write_file("42.ics", FEED).unwrap();

    let response = app(&test)
        .oneshot(request(Method::HEAD, "/cal/42.ics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/calendar; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert_eq!(body_text(response).await, "");
}

/// Tests a feed name that is not a user ID.
///
/// Expected: 404
#[tokio::test]
async fn rejects_non_numeric_feed_name() {
    let test = TestContext::new().unwrap();

    let response = app(&test)
        .oneshot(request(Method::GET, "/cal/x.ics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Tests the instructions page route.
///
/// Expected: 200 HTML
#[tokio::test]
async fn routes_home_page() {
    let test = TestContext::new().unwrap();

    let response = app(&test).oneshot(request(Method::GET, "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Discord Events Calendar"));
}
