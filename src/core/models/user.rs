use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::models::common::SortOrder;

/// A member account. Password and salt never leave the server.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub student_index_id: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub salt: String,
    pub role: String,
    pub status: String,
    pub faculty: String,
    pub year: String,
    pub profile_picture: Option<String>,
    pub linkedin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub is_email_verified: bool,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub student_index_id: String,
    pub password: String,
    pub salt: String,
    pub role: String,
    pub status: String,
    pub faculty: String,
    pub year: String,
    pub profile_picture: Option<String>,
    pub linkedin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_email_verified: bool,
}

fn default_role() -> String {
    "member".into()
}

fn default_status() -> String {
    "active".into()
}

/// Member form used by the dashboard for both create and overwrite.
/// On overwrite a missing `password` keeps the stored one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub student_index_id: String,
    pub password: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub year: String,
    pub profile_picture: Option<String>,
    pub linkedin: Option<String>,
    #[serde(default)]
    pub is_email_verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    pub user: User,
    pub is_admin: bool,
}

#[derive(Debug, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub sort: SortOrder,
}
