use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Recurrence rule attached to a scheduled event.
///
/// Discord models a subset of RFC 5545 rules with numeric codes. Every list is
/// optional and an empty list means the same as an absent one.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceRule {
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default)]
    pub by_weekday: Option<Vec<Weekday>>,
    #[serde(default)]
    pub by_n_weekday: Option<Vec<NWeekday>>,
    #[serde(default)]
    pub by_month: Option<Vec<u8>>,
    #[serde(default)]
    pub by_month_day: Option<Vec<u8>>,
    #[serde(default)]
    pub by_year_day: Option<Vec<u16>>,
    #[serde(default)]
    pub count: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl TryFrom<u8> for Frequency {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Yearly),
            1 => Ok(Self::Monthly),
            2 => Ok(Self::Weekly),
            3 => Ok(Self::Daily),
            other => Err(format!("unknown recurrence frequency {other}")),
        }
    }
}

impl Frequency {
    pub fn as_ics_str(self) -> &'static str {
        match self {
            Self::Yearly => "YEARLY",
            Self::Monthly => "MONTHLY",
            Self::Weekly => "WEEKLY",
            Self::Daily => "DAILY",
        }
    }
}

/// Day of week, numbered from 0 (Monday) as Discord does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Monday),
            1 => Ok(Self::Tuesday),
            2 => Ok(Self::Wednesday),
            3 => Ok(Self::Thursday),
            4 => Ok(Self::Friday),
            5 => Ok(Self::Saturday),
            6 => Ok(Self::Sunday),
            other => Err(format!("unknown weekday {other}")),
        }
    }
}

impl Weekday {
    pub fn as_ics_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }
}

/// The `n`th occurrence of a weekday within the month, e.g. the second Tuesday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NWeekday {
    pub n: i8,
    pub day: Weekday,
}
