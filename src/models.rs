use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub church_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, alias = "statut")]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub church_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUser {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "statut")]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub user: Option<PresenceUser>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub church_id: Option<String>,
}

/// One item of any of the domain collections the list views display.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Expense(Expense),
    Event(Event),
    Presence(Presence),
}

impl From<Expense> for Record {
    fn from(expense: Expense) -> Self {
        Record::Expense(expense)
    }
}

impl From<Event> for Record {
    fn from(event: Event) -> Self {
        Record::Event(event)
    }
}

impl From<Presence> for Record {
    fn from(presence: Presence) -> Self {
        Record::Presence(presence)
    }
}

/// Categorical fields a view can filter on with a set of selected values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Category,
    PaymentMethod,
    Status,
    Frequency,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceStatus {
    #[serde(rename = "PRESENT")]
    Present,
    #[serde(rename = "ABSENT")]
    Absent,
    #[serde(rename = "MOTIVE")]
    Excused,
}

impl PresenceStatus {
    pub const ALL: [PresenceStatus; 3] = [
        PresenceStatus::Present,
        PresenceStatus::Absent,
        PresenceStatus::Excused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Present => STATUS_PRESENT,
            PresenceStatus::Absent => STATUS_ABSENT,
            PresenceStatus::Excused => STATUS_EXCUSED,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresenceStatus::Present => "Présent",
            PresenceStatus::Absent => "Absent",
            PresenceStatus::Excused => "Motivé",
        }
    }

    /// Parses a wire value case-insensitively.
    pub fn from_value(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Every status the presence filter offers, as `(wire value, label)` pairs.
    pub fn filter_options() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub date: String,
    pub church_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub status: String,
    pub church_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub title: String,
    pub date: String,
    pub frequency: String,
    pub church_id: String,
}
