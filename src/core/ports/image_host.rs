use crate::core::models::UploadedFileCreate;
use crate::error::Error;

/// Third-party image hosting. Returns the public URL of the stored image.
pub trait ImageHost {
    async fn upload(&self, file: UploadedFileCreate) -> Result<String, Error>;
}
