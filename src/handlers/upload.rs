use actix_multipart::Multipart;
use actix_web::web::{Data, Json};
use futures_util::TryStreamExt;
use log::info;

use crate::context::AdminInfo;
use crate::core::models::UploadedFileCreate;
use crate::core::ports::image_host::ImageHost;
use crate::error::Error;

/// Largest single image accepted before anything is sent to the image host.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

fn append_chunk(content: &mut Vec<u8>, chunk: &[u8], limit: usize, filename: &str) -> Result<(), Error> {
    if content.len() + chunk.len() > limit {
        return Err(Error::BusinessError(format!("{} exceeds the {} byte upload limit", filename, limit)));
    }
    content.extend_from_slice(chunk);
    Ok(())
}

/// Forwards every non-empty multipart file to the image host and returns the hosted URLs in order.
pub async fn create<I>(admin: AdminInfo, mut payload: Multipart, host: Data<I>) -> Result<Json<Vec<String>>, Error>
where
    I: ImageHost + 'static,
{
    let mut urls = Vec::new();
    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(|f| f.to_owned())
            .unwrap_or_else(|| field.name().to_owned());
        let mut content = Vec::new();
        while let Some(b) = field.try_next().await? {
            append_chunk(&mut content, &b, MAX_IMAGE_BYTES, &filename)?;
        }
        if content.is_empty() {
            continue;
        }
        let url = host.upload(UploadedFileCreate::from_filename(&filename, content)).await?;
        info!("{} uploaded {} -> {}", admin.email, filename, url);
        urls.push(url);
    }
    if urls.is_empty() {
        return Err(Error::BusinessError("no file uploaded".into()));
    }
    Ok(Json(urls))
}
