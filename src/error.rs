use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

/// Field name to human readable message, serialized as the `fields` object of an error body.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("record already exists")]
    Duplicate(FieldErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("business error: {0}")]
    BusinessError(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("mail relay error: {0}")]
    Mail(String),

    #[error("image host error: {0}")]
    ImageHost(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("multipart error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    ServerError(String),
}

impl Error {
    pub fn field(name: &str, message: &str) -> FieldErrors {
        let mut fields = FieldErrors::new();
        fields.insert(name.into(), message.into());
        fields
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::BusinessError(_) | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Duplicate(_) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::Mail(_) | Error::ImageHost(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        let body = match self {
            Error::Validation(fields) | Error::Duplicate(fields) => json!({"success": false, "error": self.to_string(), "fields": fields}),
            // internals stay in the log
            Error::Database(_) | Error::Migrate(_) | Error::Io(_) | Error::Config(_) | Error::ServerError(_) => {
                json!({"success": false, "error": "internal server error"})
            }
            _ => json!({"success": false, "error": self.to_string()}),
        };
        HttpResponse::build(status).json(body)
    }
}
