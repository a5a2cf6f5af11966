use std::sync::Arc;

use test_utils::{
    builder::TestBuilder,
    context::TestContext,
    factory::{self, scheduled_event::ScheduledEventFactory},
};

use crate::server::{data::IndexRepository, service::subscription::SubscriptionService};

use super::{test_state, FakeEventSource};

/// Tests adding an event a user marked Interested.
///
/// Expected: index holds the event and the feed contains it
#[tokio::test]
async fn adds_interest() {
    let test = TestContext::new().unwrap();
    let source = Arc::new(FakeEventSource::new().with_event(
        ScheduledEventFactory::new(1, 100).name("Raid").build(),
    ));
    let state = test_state(test.data_dir(), source);

    let added = SubscriptionService::new(&state)
        .add_interest(42, 1, 100)
        .await
        .unwrap();

    assert!(added);
    let index = IndexRepository::new(test.data_dir()).load(42).await.unwrap();
    assert_eq!(index.len(), 1);
    assert!(index[0].is(1, 100));
    assert!(test.read_file("42.ics").unwrap().contains("SUMMARY:Raid"));
}

/// Tests adding an event that is already tracked.
///
/// Expected: Ok(false), index unchanged, no fetch
#[tokio::test]
async fn ignores_duplicate_interest() {
    let test = TestBuilder::new()
        .with_index(42, vec![factory::index::tracked_event(1, 100)])
        .build()
        .unwrap();
    let source = Arc::new(FakeEventSource::new());
    let state = test_state(test.data_dir(), source.clone());

    let added = SubscriptionService::new(&state)
        .add_interest(42, 1, 100)
        .await
        .unwrap();

    assert!(!added);
    assert_eq!(source.fetches(), 0);
    assert_eq!(
        IndexRepository::new(test.data_dir()).load(42).await.unwrap().len(),
        1
    );
}

/// Tests that the same event ID in another guild is a different event.
///
/// Expected: both records tracked
#[tokio::test]
async fn distinguishes_guilds() {
    let test = TestContext::new().unwrap();
    let source = Arc::new(
        FakeEventSource::new()
            .with_event(ScheduledEventFactory::new(1, 100).build())
            .with_event(ScheduledEventFactory::new(2, 100).build()),
    );
    let state = test_state(test.data_dir(), source);
    let service = SubscriptionService::new(&state);

    assert!(service.add_interest(42, 1, 100).await.unwrap());
    assert!(service.add_interest(42, 2, 100).await.unwrap());

    let ics = test.read_file("42.ics").unwrap();
    assert!(ics.contains("UID:100@discord-1"));
    assert!(ics.contains("UID:100@discord-2"));
}

/// Tests removing a tracked event.
///
/// Expected: record gone from index and feed
#[tokio::test]
async fn removes_interest() {
    let test = TestContext::new().unwrap();
    let source = Arc::new(
        FakeEventSource::new()
            .with_event(ScheduledEventFactory::new(1, 100).build())
            .with_event(ScheduledEventFactory::new(1, 101).build()),
    );
    let state = test_state(test.data_dir(), source);
    let service = SubscriptionService::new(&state);
    service.add_interest(42, 1, 100).await.unwrap();
    service.add_interest(42, 1, 101).await.unwrap();

    let removed = service.remove_interest(42, 1, 100).await.unwrap();

    assert!(removed);
    let ics = test.read_file("42.ics").unwrap();
    assert!(!ics.contains("UID:100@discord-1"));
    assert!(ics.contains("UID:101@discord-1"));
}

/// Tests removing an event that was never tracked.
///
/// Expected: Ok(false) and no files created
#[tokio::test]
async fn ignores_unknown_removal() {
    let test = TestContext::new().unwrap();
    let state = test_state(test.data_dir(), Arc::new(FakeEventSource::new()));

    let removed = SubscriptionService::new(&state)
        .remove_interest(42, 1, 100)
        .await
        .unwrap();

    assert!(!removed);
    assert!(!test.file("42.ics").exists());
}

/// Tests that an update rebuilds only the feeds tracking the event.
///
/// Expected: user 42 rebuilt with the new name, user 43 untouched
#[tokio::test]
async fn rebuilds_users_tracking_updated_event() {
    let test = TestBuilder::new()
        .with_index(42, vec![factory::index::tracked_event(1, 100)])
        .with_index(43, vec![factory::index::tracked_event(1, 200)])
        .build()
        .unwrap();
    let source = Arc::new(
        FakeEventSource::new().with_event(ScheduledEventFactory::new(1, 100).name("Renamed").build()),
    );
    let state = test_state(test.data_dir(), source);

    let rebuilt = SubscriptionService::new(&state)
        .event_updated(1, 100)
        .await
        .unwrap();

    assert_eq!(rebuilt, vec![42]);
    assert!(test.read_file("42.ics").unwrap().contains("SUMMARY:Renamed"));
    assert!(!test.file("43.ics").exists());
}

/// Tests that a deleted event is removed from every index tracking it.
///
/// Expected: both users lose the event, the other record survives
#[tokio::test]
async fn removes_deleted_event_everywhere() {
    let test = TestBuilder::new()
        .with_index(
            42,
            vec![
                factory::index::tracked_event(1, 100),
                factory::index::tracked_event(1, 101),
            ],
        )
        .with_index(43, vec![factory::index::tracked_event(1, 100)])
        .with_index(44, vec![factory::index::tracked_event(1, 101)])
        .build()
        .unwrap();
    let source = Arc::new(FakeEventSource::new().with_event(ScheduledEventFactory::new(1, 101).build()));
    let state = test_state(test.data_dir(), source);

    let affected = SubscriptionService::new(&state)
        .event_deleted(1, 100)
        .await
        .unwrap();

    assert_eq!(affected, vec![42, 43]);
    let repo = IndexRepository::new(test.data_dir());
    assert_eq!(repo.load(42).await.unwrap().len(), 1);
    assert!(repo.load(43).await.unwrap().is_empty());
    assert_eq!(repo.load(44).await.unwrap().len(), 1);
}

/// Tests that a malformed index is skipped and left as is.
///
/// Expected: other users still processed, malformed file untouched
#[tokio::test]
async fn skips_malformed_index() {
    let test = TestBuilder::new()
        .with_index(43, vec![factory::index::tracked_event(1, 100)])
        .build()
        .unwrap();
    test.write_file("42.json", "{not json").unwrap();
    let state = test_state(test.data_dir(), Arc::new(FakeEventSource::new()));

    let affected = SubscriptionService::new(&state)
        .event_deleted(1, 100)
        .await
        .unwrap();

    assert_eq!(affected, vec![43]);
    assert_eq!(test.read_file("42.json").unwrap(), "{not json");
}

/// Tests preparing the feed of a user who never tracked anything.
///
/// Expected: empty files created, nothing fetched
#[tokio::test]
async fn prepares_empty_feed() {
    let test = TestContext::new().unwrap();
    let source = Arc::new(FakeEventSource::new());
    let state = test_state(test.data_dir(), source.clone());

    let summary = SubscriptionService::new(&state)
        .prepare_feed(42)
        .await
        .unwrap();

    assert_eq!(summary.events, 0);
    assert_eq!(source.fetches(), 0);
    assert!(test.file("42.json").exists());
    assert!(test
        .read_file("42.ics")
        .unwrap()
        .starts_with("BEGIN:VCALENDAR"));
}

/// Tests refreshing every user's feed.
///
/// Expected: each index rebuilt, missing events pruned
#[tokio::test]
async fn refreshes_all_users() {
    let test = TestBuilder::new()
        .with_index(42, vec![factory::index::tracked_event(1, 100)])
        .with_index(43, vec![factory::index::tracked_event(1, 999)])
        .build()
        .unwrap();
    let source = Arc::new(FakeEventSource::new().with_event(ScheduledEventFactory::new(1, 100).build()));
    let state = test_state(test.data_dir(), source);

    let refreshed = SubscriptionService::new(&state).refresh_all().await.unwrap();

    assert_eq!(refreshed, 2);
    assert!(test.read_file("42.ics").unwrap().contains("UID:100@discord-1"));
    assert!(IndexRepository::new(test.data_dir())
        .load(43)
        .await
        .unwrap()
        .is_empty());
}

/// Tests that one broken index does not stop the refresh.
///
/// Expected: the healthy user is refreshed, the count excludes the broken one
#[tokio::test]
async fn refresh_all_continues_after_error() {
    let test = TestBuilder::new()
        .with_index(43, vec![factory::index::tracked_event(1, 100)])
        .build()
        .unwrap();
    test.write_file("42.json", "[{").unwrap();
    let source = Arc::new(FakeEventSource::new().with_event(ScheduledEventFactory::new(1, 100).build()));
    let state = test_state(test.data_dir(), source);

    let refreshed = SubscriptionService::new(&state).refresh_all().await.unwrap();

    assert_eq!(refreshed, 1);
    assert_eq!(test.read_file("42.json").unwrap(), "[{");
}
