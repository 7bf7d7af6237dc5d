use log::info;
use serde::Serialize;

use crate::core::models::application::{Application, ApplicationEdit, ApplicationFilter, ApplicationStatus};
use crate::core::models::common::{contains_ci, eq_ci, search_term, SortOrder};
use crate::core::ports::mailer::Mailer;
use crate::core::ports::repository::{ApplicationCommon, SettingCommon};
use crate::core::services::notification::{self, NotifyConfig};
use crate::core::validation::{clean_list, normalize_email, Checker};
use crate::error::Error;

/// In-memory search, filter and sort over the whole collection, as the dashboard shows it.
pub fn filter_applications(applications: Vec<Application>, filter: &ApplicationFilter) -> Vec<Application> {
    let term = search_term(&filter.search);
    let mut list: Vec<Application> = applications
        .into_iter()
        .filter(|a| match &term {
            Some(t) => contains_ci(&a.name, t) || contains_ci(&a.email, t) || contains_ci(&a.student_index_id, t),
            None => true,
        })
        .filter(|a| filter.status.map_or(true, |s| a.status == s))
        .filter(|a| filter.faculty.as_ref().map_or(true, |f| eq_ci(&a.faculty, f)))
        .filter(|a| filter.year.as_ref().map_or(true, |y| eq_ci(&a.year, y)))
        .collect();
    match filter.sort {
        SortOrder::Newest => list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortOrder::Name => list.sort_by_key(|a| a.name.to_lowercase()),
    }
    list
}

pub async fn list_applications<S: ApplicationCommon>(store: &S, filter: &ApplicationFilter) -> Result<Vec<Application>, Error> {
    let all = ApplicationCommon::all(store).await?;
    Ok(filter_applications(all, filter))
}

pub async fn get_application<S: ApplicationCommon>(store: &S, id: &str) -> Result<Application, Error> {
    ApplicationCommon::get(store, id).await?.ok_or_else(|| Error::NotFound(format!("application {}", id)))
}

/// Replaces every field of the targeted record with the edit. Last write wins.
pub async fn overwrite_application<S: ApplicationCommon>(store: &S, id: &str, edit: ApplicationEdit) -> Result<Application, Error> {
    let mut checker = Checker::default();
    checker
        .required("name", "Name", &edit.name)
        .required("studentIndexId", "Student index ID", &edit.student_index_id);
    if !crate::core::validation::is_valid_email(edit.email.trim()) {
        checker.fail("email", "Please enter a valid email address");
    }
    checker.finish()?;
    let application = Application {
        id: id.to_owned(),
        name: edit.name.trim().to_owned(),
        email: normalize_email(&edit.email),
        student_index_id: edit.student_index_id.trim().to_owned(),
        faculty: edit.faculty.trim().to_owned(),
        year: edit.year.trim().to_owned(),
        interests: clean_list(edit.interests),
        message: edit.message,
        timestamp: edit.timestamp,
        status: edit.status,
        is_email_send: edit.is_email_send,
    };
    if !ApplicationCommon::replace(store, &application).await? {
        return Err(Error::NotFound(format!("application {}", id)));
    }
    info!("application {} overwritten", id);
    Ok(application)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub application: Application,
    /// Set when the change triggered a welcome mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
}

/// Moving a record to `approved` sends the welcome mail, best effort.
pub async fn change_status<S, M>(store: &S, mailer: &M, notify: &NotifyConfig, id: &str, status: ApplicationStatus) -> Result<StatusChanged, Error>
where
    S: ApplicationCommon + SettingCommon,
    M: Mailer,
{
    let mut application = get_application(store, id).await?;
    let previous = application.status;
    if !ApplicationCommon::set_status(store, id, status).await? {
        return Err(Error::NotFound(format!("application {}", id)));
    }
    application.status = status;
    info!("application {} status {} -> {}", id, previous, status);
    let email_sent = if status == ApplicationStatus::Approved && previous != ApplicationStatus::Approved {
        Some(notification::dispatch_welcome_email(store, mailer, notify, &application.name, &application.email).await)
    } else {
        None
    };
    Ok(StatusChanged { application, email_sent })
}

pub async fn delete_application<S: ApplicationCommon>(store: &S, id: &str) -> Result<(), Error> {
    if !ApplicationCommon::delete(store, id).await? {
        return Err(Error::NotFound(format!("application {}", id)));
    }
    Ok(())
}
