use actix_web::web::{Data, Json, Path};
use log::info;
use serde::{Deserialize, Serialize};

use crate::context::AdminInfo;
use crate::core::ports::repository::SettingCommon;
use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct Setting {
    key: String,
    value: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingValue {
    value: String,
}

pub async fn get<S: SettingCommon + 'static>(key: Path<(String,)>, store: Data<S>) -> Result<Json<Setting>, Error> {
    let key = key.into_inner().0;
    let value = store.get_setting(&key).await?.ok_or_else(|| Error::NotFound(format!("setting {}", key)))?;
    Ok(Json(Setting { key, value }))
}

pub async fn put<S: SettingCommon + 'static>(
    admin: AdminInfo,
    key: Path<(String,)>,
    Json(SettingValue { value }): Json<SettingValue>,
    store: Data<S>,
) -> Result<Json<Setting>, Error> {
    let key = key.into_inner().0;
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(Error::Validation(Error::field("value", "value is required")));
    }
    store.put_setting(&key, &value).await?;
    info!("{} updated setting {}", admin.email, key);
    Ok(Json(Setting { key, value }))
}
