use actix_web::http::StatusCode;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::HttpResponse;
use log::info;

use crate::context::AdminInfo;
use crate::core::models::user::{User, UserForm};
use crate::core::ports::repository::UserCommon;
use crate::core::services::member;
use crate::error::Error;
use crate::request::UserListParams;
use crate::response::{DeleteResponse, List};

pub async fn list<S>(Query(params): Query<UserListParams>, store: Data<S>) -> Result<Json<List<User>>, Error>
where
    S: UserCommon + 'static,
{
    let users = UserCommon::all(store.get_ref()).await?;
    Ok(Json(List::from(member::filter_users(users, &params.into()))))
}

pub async fn detail<S>(id: Path<(String,)>, store: Data<S>) -> Result<Json<User>, Error>
where
    S: UserCommon + 'static,
{
    let id = id.into_inner().0;
    let user = UserCommon::get(store.get_ref(), &id).await?.ok_or_else(|| Error::NotFound(format!("user {}", id)))?;
    Ok(Json(user))
}

pub async fn create<S>(admin: AdminInfo, Json(form): Json<UserForm>, store: Data<S>) -> Result<HttpResponse, Error>
where
    S: UserCommon + 'static,
{
    let user = member::create_member(store.get_ref(), form).await?;
    info!("{} added member {}", admin.email, user.email);
    Ok(HttpResponse::build(StatusCode::CREATED).json(user))
}

pub async fn overwrite<S>(admin: AdminInfo, id: Path<(String,)>, Json(form): Json<UserForm>, store: Data<S>) -> Result<Json<User>, Error>
where
    S: UserCommon + 'static,
{
    let id = id.into_inner().0;
    let user = member::overwrite_member(store.get_ref(), &id, form).await?;
    info!("{} overwrote member {}", admin.email, id);
    Ok(Json(user))
}

pub async fn delete<S>(admin: AdminInfo, id: Path<(String,)>, store: Data<S>) -> Result<Json<DeleteResponse>, Error>
where
    S: UserCommon + 'static,
{
    let id = id.into_inner().0;
    if admin.id == id {
        return Err(Error::BusinessError("admins cannot delete their own account".into()));
    }
    if !UserCommon::delete(store.get_ref(), &id).await? {
        return Err(Error::NotFound(format!("user {}", id)));
    }
    info!("{} deleted member {}", admin.email, id);
    Ok(Json(DeleteResponse { deleted: true }))
}
