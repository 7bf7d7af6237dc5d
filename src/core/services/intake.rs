use log::{error, info};

use crate::core::models::application::{Application, ApplicationDetails, ApplicationForm, Availability, Submission};
use crate::core::models::common::eq_ci;
use crate::core::ports::mailer::Mailer;
use crate::core::ports::repository::{ApplicationCommon, SettingCommon};
use crate::core::services::notification::{self, NotifyConfig};
use crate::core::validation::validate_application;
use crate::error::{Error, FieldErrors};

impl Availability {
    pub fn is_taken(&self) -> bool {
        self.email_taken || self.student_index_id_taken
    }

    pub fn conflicts(&self) -> FieldErrors {
        let mut fields = FieldErrors::new();
        if self.email_taken {
            fields.insert("email".into(), "An application with this email already exists".into());
        }
        if self.student_index_id_taken {
            fields.insert("studentIndexId".into(), "An application with this student index ID already exists".into());
        }
        fields
    }
}

/// Scans existing applications for the given email and student index id.
/// Blank inputs are never reported as taken.
pub fn scan_availability(existing: &[Application], email: Option<&str>, student_index_id: Option<&str>) -> Availability {
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let sid = student_index_id.map(str::trim).filter(|s| !s.is_empty());
    Availability {
        email_taken: email.map_or(false, |e| existing.iter().any(|a| eq_ci(&a.email, e))),
        student_index_id_taken: sid.map_or(false, |s| existing.iter().any(|a| eq_ci(&a.student_index_id, s))),
    }
}

pub async fn check_availability<S>(store: &S, email: Option<&str>, student_index_id: Option<&str>) -> Result<Availability, Error>
where
    S: ApplicationCommon,
{
    let existing = ApplicationCommon::all(store).await?;
    Ok(scan_availability(&existing, email, student_index_id))
}

/// The intake workflow: validate, reject duplicates, insert with
/// `isEmailSend = false`, send both mails, then flip the flag on success.
pub async fn submit_application<S, M>(store: &S, mailer: &M, notify: &NotifyConfig, form: ApplicationForm) -> Result<Submission, Error>
where
    S: ApplicationCommon + SettingCommon,
    M: Mailer,
{
    let insert = validate_application(form)?;
    let availability = check_availability(store, Some(&insert.email), Some(&insert.student_index_id)).await?;
    if availability.is_taken() {
        info!("rejected duplicate application (email: {}, student index id: {})", insert.email, insert.student_index_id);
        return Err(Error::Duplicate(availability.conflicts()));
    }
    let mut application = ApplicationCommon::insert(store, insert).await?;
    info!("stored application {} for {}", application.id, application.email);
    let email_sent = notification::dispatch_application_emails(store, mailer, notify, &ApplicationDetails::from(&application)).await;
    if email_sent {
        match ApplicationCommon::set_email_sent(store, &application.id, true).await {
            Ok(()) => application.is_email_send = true,
            Err(e) => error!("failed to flag application {} as emailed: {}", application.id, e),
        }
    }
    Ok(Submission { application, email_sent })
}
