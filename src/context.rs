use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::Error;

/// The admin who passed the gate; placed into request extensions by `middlewares::admin`.
#[derive(Debug, Clone)]
pub struct AdminInfo {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl FromRequest for AdminInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(admin) = req.extensions().get::<Self>() {
            ready(Ok(admin.clone()))
        } else {
            ready(Err(Error::Unauthorized))
        }
    }
}

/// Best effort client address for `lastLoginIp`.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info().realip_remote_addr().map(|addr| addr.to_owned())
}
