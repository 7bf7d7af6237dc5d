use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use log::info;

use crate::context::AdminInfo;
use crate::core::models::application::{Application, ApplicationEdit, ApplicationForm, Availability, StatusChange};
use crate::core::ports::mailer::Mailer;
use crate::core::ports::repository::{ApplicationCommon, SettingCommon};
use crate::core::services::notification::NotifyConfig;
use crate::core::services::{intake, review};
use crate::error::Error;
use crate::request::{ApplicationListParams, AvailabilityParams};
use crate::response::{DeleteResponse, List};

/// Live duplicate feedback for the join form.
pub async fn availability<S>(Query(params): Query<AvailabilityParams>, store: Data<S>) -> Result<Json<Availability>, Error>
where
    S: ApplicationCommon + 'static,
{
    let availability = intake::check_availability(store.get_ref(), params.email.as_deref(), params.student_index_id.as_deref()).await?;
    Ok(Json(availability))
}

pub async fn submit<S, M>(Json(form): Json<ApplicationForm>, store: Data<S>, mailer: Data<M>, notify: Data<NotifyConfig>) -> Result<HttpResponse, Error>
where
    S: ApplicationCommon + SettingCommon + 'static,
    M: Mailer + 'static,
{
    let submission = intake::submit_application(store.get_ref(), mailer.get_ref(), &notify, form).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(submission))
}

pub async fn list<S>(Query(params): Query<ApplicationListParams>, store: Data<S>) -> Result<Json<List<Application>>, Error>
where
    S: ApplicationCommon + 'static,
{
    let list = review::list_applications(store.get_ref(), &params.into()).await?;
    Ok(Json(List::from(list)))
}

pub async fn detail<S>(id: Path<(String,)>, store: Data<S>) -> Result<Json<Application>, Error>
where
    S: ApplicationCommon + 'static,
{
    let id = id.into_inner().0;
    Ok(Json(review::get_application(store.get_ref(), &id).await?))
}

pub async fn overwrite<S>(admin: AdminInfo, id: Path<(String,)>, Json(edit): Json<ApplicationEdit>, store: Data<S>) -> Result<Json<Application>, Error>
where
    S: ApplicationCommon + 'static,
{
    let id = id.into_inner().0;
    let application = review::overwrite_application(store.get_ref(), &id, edit).await?;
    info!("{} overwrote application {}", admin.email, id);
    Ok(Json(application))
}

pub async fn change_status<S, M>(
    admin: AdminInfo,
    id: Path<(String,)>,
    Json(StatusChange { status }): Json<StatusChange>,
    store: Data<S>,
    mailer: Data<M>,
    notify: Data<NotifyConfig>,
) -> Result<Json<review::StatusChanged>, Error>
where
    S: ApplicationCommon + SettingCommon + 'static,
    M: Mailer + 'static,
{
    let id = id.into_inner().0;
    let changed = review::change_status(store.get_ref(), mailer.get_ref(), &notify, &id, status).await?;
    info!("{} set application {} to {}", admin.email, id, status);
    Ok(Json(changed))
}

pub async fn delete<S>(admin: AdminInfo, id: Path<(String,)>, store: Data<S>) -> Result<Json<DeleteResponse>, Error>
where
    S: ApplicationCommon + 'static,
{
    let id = id.into_inner().0;
    review::delete_application(store.get_ref(), &id).await?;
    info!("{} deleted application {}", admin.email, id);
    Ok(Json(DeleteResponse { deleted: true }))
}
