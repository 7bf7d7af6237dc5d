use chrono::Utc;
use log::{error, info, warn};

use crate::core::models::application::ApplicationDetails;
use crate::core::ports::mailer::{Mail, Mailer};
use crate::core::ports::repository::SettingCommon;
use crate::core::templates::{self, render, render_plain};
use crate::error::Error;

pub static COMMUNITY_LINK_KEY: &str = "communityLink";

#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub club_name: String,
    pub admin_email: String,
    /// Used when the `communityLink` setting is missing or unreadable.
    pub community_link: String,
}

pub async fn community_link<S: SettingCommon>(store: &S, config: &NotifyConfig) -> String {
    match store.get_setting(COMMUNITY_LINK_KEY).await {
        Ok(Some(link)) if !link.trim().is_empty() => link,
        Ok(_) => config.community_link.clone(),
        Err(e) => {
            warn!("failed to read {} setting, using default: {}", COMMUNITY_LINK_KEY, e);
            config.community_link.clone()
        }
    }
}

fn application_mails(details: &ApplicationDetails, config: &NotifyConfig, link: &str) -> (Mail, Mail) {
    let interests = if details.interests.is_empty() { "-".to_owned() } else { details.interests.join(", ") };
    let message = if details.message.trim().is_empty() { "-" } else { details.message.as_str() };
    let timestamp = details.timestamp.unwrap_or_else(Utc::now).format("%Y-%m-%d %H:%M UTC").to_string();
    let values = [
        ("name", details.name.as_str()),
        ("email", details.email.as_str()),
        ("studentIndexId", details.student_index_id.as_str()),
        ("faculty", details.faculty.as_str()),
        ("year", details.year.as_str()),
        ("interests", interests.as_str()),
        ("message", message),
        ("timestamp", timestamp.as_str()),
        ("communityLink", link),
        ("clubName", config.club_name.as_str()),
    ];
    let applicant = Mail {
        to: details.email.clone(),
        to_name: Some(details.name.clone()),
        subject: render_plain(templates::APPLICANT_CONFIRMATION_SUBJECT, &values),
        html: render(templates::APPLICANT_CONFIRMATION, &values),
    };
    let admin = Mail {
        to: config.admin_email.clone(),
        to_name: None,
        subject: render_plain(templates::ADMIN_NOTIFICATION_SUBJECT, &values),
        html: render(templates::ADMIN_NOTIFICATION, &values),
    };
    (applicant, admin)
}

async fn send_application_mails<S, M>(store: &S, mailer: &M, config: &NotifyConfig, details: &ApplicationDetails) -> Result<(), Error>
where
    S: SettingCommon,
    M: Mailer,
{
    if details.email.trim().is_empty() || details.name.trim().is_empty() {
        return Err(Error::BusinessError("name and email are required".into()));
    }
    let link = community_link(store, config).await;
    let (applicant, admin) = application_mails(details, config, &link);
    mailer.send(&applicant).await?;
    mailer.send(&admin).await?;
    Ok(())
}

/// Sends the applicant confirmation then the admin notification.
/// Any failure is logged and reported as `false`; nothing is retried.
pub async fn dispatch_application_emails<S, M>(store: &S, mailer: &M, config: &NotifyConfig, details: &ApplicationDetails) -> bool
where
    S: SettingCommon,
    M: Mailer,
{
    match send_application_mails(store, mailer, config, details).await {
        Ok(()) => {
            info!("application emails sent to {}", details.email);
            true
        }
        Err(e) => {
            error!("failed to send application emails to {}: {}", details.email, e);
            false
        }
    }
}

/// Welcome mail for an approved applicant. Same failure policy as above.
pub async fn dispatch_welcome_email<S, M>(store: &S, mailer: &M, config: &NotifyConfig, name: &str, email: &str) -> bool
where
    S: SettingCommon,
    M: Mailer,
{
    if email.trim().is_empty() {
        error!("welcome email skipped: no address");
        return false;
    }
    let link = community_link(store, config).await;
    let values = [("name", name), ("communityLink", link.as_str()), ("clubName", config.club_name.as_str())];
    let mail = Mail {
        to: email.to_owned(),
        to_name: Some(name.to_owned()),
        subject: render_plain(templates::WELCOME_SUBJECT, &values),
        html: render(templates::WELCOME, &values),
    };
    match mailer.send(&mail).await {
        Ok(()) => true,
        Err(e) => {
            error!("failed to send welcome email to {}: {}", email, e);
            false
        }
    }
}
