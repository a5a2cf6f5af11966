use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar entry derived from one Discord scheduled event.
///
/// This is everything a VEVENT carries apart from the SEQUENCE number. It is stored
/// in the user's index as the last known snapshot so that changes can be detected
/// by plain equality and the feed can keep serving an event while Discord is
/// unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub uid: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// RRULE values, without the `RRULE:` prefix.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
    #[serde(default)]
    pub status: FeedEventStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedEventStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl FeedEventStatus {
    pub fn as_ics_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}
