use actix_web::web::{Data, Json};
use actix_web::HttpResponse;
use serde::Deserialize;
use serde_json::json;

use crate::core::models::application::ApplicationDetails;
use crate::core::ports::mailer::Mailer;
use crate::core::ports::repository::SettingCommon;
use crate::core::services::notification::{self, NotifyConfig};
use crate::response::Message;

fn failed(error: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"success": false, "error": error}))
}

/// Sends the applicant confirmation and the committee notification for the posted details.
pub async fn application<S, M>(Json(details): Json<ApplicationDetails>, store: Data<S>, mailer: Data<M>, notify: Data<NotifyConfig>) -> HttpResponse
where
    S: SettingCommon + 'static,
    M: Mailer + 'static,
{
    if notification::dispatch_application_emails(store.get_ref(), mailer.get_ref(), &notify, &details).await {
        HttpResponse::Ok().json(Message::ok("Emails sent successfully"))
    } else {
        failed("Failed to send emails")
    }
}

#[derive(Debug, Deserialize)]
pub struct Approval {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

pub async fn approval<S, M>(Json(Approval { name, email }): Json<Approval>, store: Data<S>, mailer: Data<M>, notify: Data<NotifyConfig>) -> HttpResponse
where
    S: SettingCommon + 'static,
    M: Mailer + 'static,
{
    if notification::dispatch_welcome_email(store.get_ref(), mailer.get_ref(), &notify, &name, &email).await {
        HttpResponse::Ok().json(Message::ok("Welcome email sent successfully"))
    } else {
        failed("Failed to send welcome email")
    }
}
