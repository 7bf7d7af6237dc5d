use std::future::{ready, Future, Ready};
use std::marker::PhantomData;
use std::pin::Pin;
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest};

use crate::context::AdminInfo;
use crate::core::ports::repository::UserCommon;
use crate::core::services::member::{verify_admin, AdminRoles};
use crate::error::Error;

pub static ADMIN_EMAIL_HEADER: &str = "X-Admin-Email";
pub static ADMIN_PASSWORD_HEADER: &str = "X-Admin-Password";

fn credentials(req: &HttpRequest) -> Option<(String, String)> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };
    Some((header(ADMIN_EMAIL_HEADER)?, header(ADMIN_PASSWORD_HEADER)?))
}

/// Gates a scope behind admin credentials checked against the `users` collection of `D`.
/// `Data<D>` and `Data<AdminRoles>` must be registered as app data.
pub struct AdminGate<D> {
    _store: PhantomData<D>,
}

impl<D> AdminGate<D> {
    pub fn new() -> Self {
        Self { _store: PhantomData }
    }
}

impl<D> Default for AdminGate<D> {
    fn default() -> Self {
        Self::new()
    }
}

async fn authorize<D: UserCommon + 'static>(req: &ServiceRequest) -> Result<AdminInfo, Error> {
    let (email, password) = credentials(req.request()).ok_or(Error::Unauthorized)?;
    let store = req
        .app_data::<Data<D>>()
        .ok_or_else(|| Error::ServerError("admin gate mounted without a store".into()))?;
    let roles = req
        .app_data::<Data<AdminRoles>>()
        .ok_or_else(|| Error::ServerError("admin gate mounted without admin roles".into()))?;
    let admin = verify_admin(store.get_ref(), roles, &email, &password).await?;
    Ok(AdminInfo {
        id: admin.id,
        email: admin.email,
        role: admin.role,
    })
}

impl<S, B, D> Transform<S, ServiceRequest> for AdminGate<D>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
    D: UserCommon + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdminGateMiddleware<S, D>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateMiddleware {
            service: Rc::new(service),
            _store: PhantomData,
        }))
    }
}

pub struct AdminGateMiddleware<S, D> {
    service: Rc<S>,
    _store: PhantomData<D>,
}

impl<S, B, D> Service<ServiceRequest> for AdminGateMiddleware<S, D>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
    D: UserCommon + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    // Rejections are rendered here so the outer header middleware still decorates them.
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        Box::pin(async move {
            match authorize::<D>(&req).await {
                Ok(admin) => {
                    req.extensions_mut().insert(admin);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(req.error_response(e).map_into_right_body()),
            }
        })
    }
}
