use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::models::application::Application;
use crate::error::Error;

/// Row of the `applications` table; `status` is stored as text.
#[derive(Debug, FromRow)]
pub struct ApplicationRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_index_id: String,
    pub faculty: String,
    pub year: String,
    pub interests: Vec<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
    pub is_email_send: bool,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;
    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            status: row.status.parse()?,
            id: row.id,
            name: row.name,
            email: row.email,
            student_index_id: row.student_index_id,
            faculty: row.faculty,
            year: row.year,
            interests: row.interests,
            message: row.message,
            timestamp: row.submitted_at,
            is_email_send: row.is_email_send,
        })
    }
}
