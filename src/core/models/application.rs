use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::common::SortOrder;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::BusinessError(format!("invalid application status({})", s))),
        }
    }
}

/// A membership application as stored in the `applications` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    pub interests: Vec<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub is_email_send: bool,
}

/// Join form as posted by the public site. Every field defaults so that
/// missing values surface as validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    pub interests: Vec<String>,
    pub message: String,
}

/// Everything but the key; the store generates `id`.
#[derive(Debug, Clone)]
pub struct ApplicationInsert {
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    pub interests: Vec<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub is_email_send: bool,
}

/// Whole-record overwrite sent by the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEdit {
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub is_email_send: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub email_taken: bool,
    pub student_index_id_taken: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub application: Application,
    pub email_sent: bool,
}

#[derive(Debug, Default)]
pub struct ApplicationFilter {
    pub search: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub faculty: Option<String>,
    pub year: Option<String>,
    pub sort: SortOrder,
}

/// The fields the notification templates need; also the body of the
/// `/api/notifications/application` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDetails {
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    pub interests: Vec<String>,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<&Application> for ApplicationDetails {
    fn from(a: &Application) -> Self {
        Self {
            name: a.name.clone(),
            email: a.email.clone(),
            student_index_id: a.student_index_id.clone(),
            faculty: a.faculty.clone(),
            year: a.year.clone(),
            interests: a.interests.clone(),
            message: a.message.clone(),
            timestamp: Some(a.timestamp),
        }
    }
}
