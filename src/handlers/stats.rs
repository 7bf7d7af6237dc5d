use actix_web::web::{Data, Json};

use crate::core::ports::repository::Store;
use crate::core::services::stats::{collect_stats, DashboardStats};
use crate::error::Error;

pub async fn dashboard<S: Store + 'static>(store: Data<S>) -> Result<Json<DashboardStats>, Error> {
    Ok(Json(collect_stats(store.get_ref()).await?))
}
