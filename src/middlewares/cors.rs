use actix_web::middleware::DefaultHeaders;
use actix_web::HttpResponse;

use crate::middlewares::admin::{ADMIN_EMAIL_HEADER, ADMIN_PASSWORD_HEADER};

/// Permissive CORS headers added to every response.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PUT, PATCH, DELETE, OPTIONS"))
        .add((
            "Access-Control-Allow-Headers",
            format!("Content-Type, {}, {}", ADMIN_EMAIL_HEADER, ADMIN_PASSWORD_HEADER),
        ))
        .add(("Access-Control-Max-Age", "3600"))
}

/// Answers any `OPTIONS` request; the headers come from [`cors_headers`].
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}
