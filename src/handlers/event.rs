use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use log::info;

use crate::context::AdminInfo;
use crate::core::models::event::{ActiveToggle, Event, EventForm};
use crate::core::ports::repository::EventCommon;
use crate::core::services::event as events;
use crate::error::Error;
use crate::request::EventListParams;
use crate::response::{DeleteResponse, List};

pub async fn public_list<S>(Query(params): Query<EventListParams>, store: Data<S>) -> Result<Json<List<Event>>, Error>
where
    S: EventCommon + 'static,
{
    let list = events::list_events(store.get_ref(), &params.into_filter(false)).await?;
    Ok(Json(List::from(list)))
}

pub async fn public_detail<S>(id: Path<(String,)>, store: Data<S>) -> Result<Json<Event>, Error>
where
    S: EventCommon + 'static,
{
    Ok(Json(events::get_event(store.get_ref(), &id.into_inner().0, false).await?))
}

pub async fn admin_list<S>(Query(params): Query<EventListParams>, store: Data<S>) -> Result<Json<List<Event>>, Error>
where
    S: EventCommon + 'static,
{
    let list = events::list_events(store.get_ref(), &params.into_filter(true)).await?;
    Ok(Json(List::from(list)))
}

pub async fn create<S>(admin: AdminInfo, Json(form): Json<EventForm>, store: Data<S>) -> Result<HttpResponse, Error>
where
    S: EventCommon + 'static,
{
    let event = events::create_event(store.get_ref(), form).await?;
    info!("{} created event {} ({})", admin.email, event.event_id, event.event_name);
    Ok(HttpResponse::build(StatusCode::CREATED).json(event))
}

pub async fn overwrite<S>(admin: AdminInfo, id: Path<(String,)>, Json(form): Json<EventForm>, store: Data<S>) -> Result<Json<Event>, Error>
where
    S: EventCommon + 'static,
{
    let id = id.into_inner().0;
    let event = events::overwrite_event(store.get_ref(), &id, form).await?;
    info!("{} overwrote event {}", admin.email, id);
    Ok(Json(event))
}

pub async fn toggle<S>(admin: AdminInfo, id: Path<(String,)>, Json(ActiveToggle { is_active }): Json<ActiveToggle>, store: Data<S>) -> Result<Json<Event>, Error>
where
    S: EventCommon + 'static,
{
    let id = id.into_inner().0;
    let event = events::set_event_active(store.get_ref(), &id, is_active).await?;
    info!("{} set event {} active={}", admin.email, id, is_active);
    Ok(Json(event))
}

pub async fn delete<S>(admin: AdminInfo, id: Path<(String,)>, store: Data<S>) -> Result<Json<DeleteResponse>, Error>
where
    S: EventCommon + 'static,
{
    let id = id.into_inner().0;
    events::delete_event(store.get_ref(), &id).await?;
    info!("{} deleted event {}", admin.email, id);
    Ok(Json(DeleteResponse { deleted: true }))
}
