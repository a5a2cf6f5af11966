use chrono::Duration;
use test_utils::factory::{
    recurrence_rule::RecurrenceRuleFactory,
    scheduled_event::{default_start, ScheduledEventFactory},
};

use crate::server::{
    model::{discord::ScheduledEvent, feed::FeedEventStatus},
    service::calendar::{convert, recurrence},
};


fn event(payload: serde_json::Value) -> ScheduledEvent {
    serde_json::from_value(payload).unwrap()
}
