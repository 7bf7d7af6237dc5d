use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: String,
    pub event_name: String,
    pub event_type: String,
    pub organized_by: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    pub description: String,
    pub image_url: Option<String>,
    pub registration_required: bool,
    pub registration_deadline: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    pub contact_person: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EventInsert {
    pub event_name: String,
    pub event_type: String,
    pub organized_by: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub venue: String,
    pub description: String,
    pub image_url: Option<String>,
    pub registration_required: bool,
    pub registration_deadline: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    pub contact_person: String,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_status() -> String {
    "upcoming".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub organized_by: String,
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub registration_required: bool,
    pub registration_deadline: Option<NaiveDate>,
    pub max_participants: Option<i32>,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveToggle {
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventWindow {
    #[default]
    Upcoming,
    Past,
    All,
}

#[derive(Debug, Default)]
pub struct EventFilter {
    pub window: EventWindow,
    pub event_type: Option<String>,
    pub include_inactive: bool,
}
