use chrono::{DateTime, Utc};

use crate::core::models::{
    application::{Application, ApplicationInsert, ApplicationStatus},
    event::{Event, EventInsert},
    user::{User, UserInsert},
};
use crate::error::Error;

/// The `applications` collection. Implementations must refuse an insert or
/// replace whose email (case-insensitive) or student index id already belongs
/// to another record, failing with `Error::Duplicate`.
pub trait ApplicationCommon {
    async fn insert(&self, data: ApplicationInsert) -> Result<Application, Error>;
    async fn all(&self) -> Result<Vec<Application>, Error>;
    async fn get(&self, id: &str) -> Result<Option<Application>, Error>;
    async fn replace(&self, application: &Application) -> Result<bool, Error>;
    async fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<bool, Error>;
    async fn set_email_sent(&self, id: &str, sent: bool) -> Result<(), Error>;
    async fn delete(&self, id: &str) -> Result<bool, Error>;
}

/// The `users` collection; email is unique case-insensitively.
pub trait UserCommon {
    async fn insert(&self, data: UserInsert) -> Result<User, Error>;
    async fn all(&self) -> Result<Vec<User>, Error>;
    async fn get(&self, id: &str) -> Result<Option<User>, Error>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error>;
    async fn replace(&self, user: &User) -> Result<bool, Error>;
    async fn record_login(&self, id: &str, at: DateTime<Utc>, ip: Option<String>) -> Result<(), Error>;
    async fn delete(&self, id: &str) -> Result<bool, Error>;
}

pub trait EventCommon {
    async fn insert(&self, data: EventInsert) -> Result<Event, Error>;
    async fn all(&self) -> Result<Vec<Event>, Error>;
    async fn get(&self, id: &str) -> Result<Option<Event>, Error>;
    async fn replace(&self, event: &Event) -> Result<bool, Error>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<bool, Error>;
    async fn delete(&self, id: &str) -> Result<bool, Error>;
}

/// Free-form configuration values such as the community link.
pub trait SettingCommon {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, Error>;
    async fn put_setting(&self, key: &str, value: &str) -> Result<(), Error>;
}

pub trait Store: ApplicationCommon + UserCommon + EventCommon + SettingCommon {}

impl<T> Store for T where T: ApplicationCommon + UserCommon + EventCommon + SettingCommon {}
