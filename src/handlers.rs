pub mod application;
pub mod event;
pub mod notification;
pub mod setting;
pub mod stats;
pub mod upload;
pub mod user;

use actix_web::guard;
use actix_web::web::{delete, get, patch, post, put, resource, scope, Data, Json, JsonConfig, QueryConfig, ServiceConfig};
use actix_web::HttpRequest;
use serde_json::{json, Value};

use crate::context::client_ip;
use crate::core::models::user::{SignIn, SignedIn};
use crate::core::ports::image_host::ImageHost;
use crate::core::ports::mailer::Mailer;
use crate::core::ports::repository::{Store, UserCommon};
use crate::core::services::member::{self, AdminRoles};
use crate::error::Error;
use crate::middlewares::admin::AdminGate;
use crate::middlewares::cors::preflight;

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub async fn sign_in<S>(req: HttpRequest, Json(SignIn { email, password }): Json<SignIn>, store: Data<S>, roles: Data<AdminRoles>) -> Result<Json<SignedIn>, Error>
where
    S: UserCommon + 'static,
{
    let signed_in = member::sign_in(store.get_ref(), &roles, &email, &password, client_ip(&req)).await?;
    Ok(Json(signed_in))
}

/// Registers every route. Expects `Data<S>`, `Data<M>`, `Data<I>`,
/// `Data<NotifyConfig>` and `Data<AdminRoles>` as app data.
pub fn configure<S, M, I>(cfg: &mut ServiceConfig)
where
    S: Store + 'static,
    M: Mailer + 'static,
    I: ImageHost + 'static,
{
    // extractor failures render with the same JSON body as every other error
    cfg.app_data(JsonConfig::default().error_handler(|err, _| Error::BusinessError(format!("invalid request body: {}", err)).into()));
    cfg.app_data(QueryConfig::default().error_handler(|err, _| Error::BusinessError(format!("invalid query: {}", err)).into()));
    cfg.service(resource("/{tail:.*}").guard(guard::Options()).to(preflight)).service(
        scope("/api")
            .route("/health", get().to(health))
            .route("/auth/sign-in", post().to(sign_in::<S>))
            .service(
                scope("/applications")
                    .route("", post().to(application::submit::<S, M>))
                    .route("/availability", get().to(application::availability::<S>)),
            )
            .service(
                scope("/notifications")
                    .route("/application", post().to(notification::application::<S, M>))
                    .route("/approval", post().to(notification::approval::<S, M>)),
            )
            .service(
                scope("/events")
                    .route("", get().to(event::public_list::<S>))
                    .route("/{id}", get().to(event::public_detail::<S>)),
            )
            .service(
                scope("/admin")
                    .wrap(AdminGate::<S>::new())
                    .route("/stats", get().to(stats::dashboard::<S>))
                    .route("/uploads", post().to(upload::create::<I>))
                    .service(
                        resource("/settings/{key}")
                            .route(get().to(setting::get::<S>))
                            .route(put().to(setting::put::<S>)),
                    )
                    .service(
                        scope("/applications")
                            .route("", get().to(application::list::<S>))
                            .route("/{id}", get().to(application::detail::<S>))
                            .route("/{id}", put().to(application::overwrite::<S>))
                            .route("/{id}", delete().to(application::delete::<S>))
                            .route("/{id}/status", patch().to(application::change_status::<S, M>)),
                    )
                    .service(
                        scope("/users")
                            .route("", get().to(user::list::<S>))
                            .route("", post().to(user::create::<S>))
                            .route("/{id}", get().to(user::detail::<S>))
                            .route("/{id}", put().to(user::overwrite::<S>))
                            .route("/{id}", delete().to(user::delete::<S>)),
                    )
                    .service(
                        scope("/events")
                            .route("", get().to(event::admin_list::<S>))
                            .route("", post().to(event::create::<S>))
                            .route("/{id}", put().to(event::overwrite::<S>))
                            .route("/{id}", delete().to(event::delete::<S>))
                            .route("/{id}/active", patch().to(event::toggle::<S>)),
                    ),
            ),
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::services::notification::COMMUNITY_LINK_KEY;
    use crate::core::ports::repository::SettingCommon;
    use crate::middlewares::admin::{ADMIN_EMAIL_HEADER, ADMIN_PASSWORD_HEADER};
    use crate::middlewares::cors::cors_headers;
    use crate::testing::{application_form, member_form, notify_config, FakeImageHost, MemoryStore, RecordingMailer};
    use actix_web::http::{Method, StatusCode};
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use actix_web::App;
    use chrono::{Duration, Utc};

    const ADMIN: (&str, &str) = ("admin@club.test", "admin-secret");

    async fn seeded() -> (Data<MemoryStore>, Data<RecordingMailer>) {
        let store = Data::new(MemoryStore::default());
        member::create_member(store.get_ref(), member_form(ADMIN.0, ADMIN.1, "admin")).await.unwrap();
        member::create_member(store.get_ref(), member_form("member@club.test", "member-secret", "member"))
            .await
            .unwrap();
        (store, Data::new(RecordingMailer::default()))
    }

    macro_rules! app {
        ($store:expr, $mailer:expr) => {
            init_service(
                App::new()
                    .wrap(cors_headers())
                    .app_data($store)
                    .app_data($mailer)
                    .app_data(Data::new(FakeImageHost))
                    .app_data(Data::new(notify_config()))
                    .app_data(Data::new(AdminRoles::parse("admin,president")))
                    .configure(configure::<MemoryStore, RecordingMailer, FakeImageHost>),
            )
            .await
        };
    }

    fn as_admin(req: TestRequest) -> TestRequest {
        req.insert_header((ADMIN_EMAIL_HEADER, ADMIN.0)).insert_header((ADMIN_PASSWORD_HEADER, ADMIN.1))
    }

    #[actix_web::test]
    async fn test_submit_then_duplicate() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer.clone());
        let req = TestRequest::post()
            .uri("/api/applications")
            .set_json(application_form("new@uni.edu", "IT2001"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["emailSent"], true);
        assert_eq!(body["application"]["status"], "pending");
        assert_eq!(body["application"]["isEmailSend"], true);
        assert_eq!(mailer.sent().len(), 2);

        let req = TestRequest::post()
            .uri("/api/applications")
            .set_json(application_form("NEW@uni.edu", "it9999"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["fields"]["email"].is_string());
        assert!(body["fields"].get("studentIndexId").is_none());
    }

    #[actix_web::test]
    async fn test_submit_invalid_form() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer.clone());
        let req = TestRequest::post()
            .uri("/api/applications")
            .set_json(application_form("not-an-email", ""))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert!(body["fields"]["email"].is_string());
        assert!(body["fields"]["studentIndexId"].is_string());
        assert!(mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_input_uses_error_body() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let req = TestRequest::post()
            .uri("/api/applications")
            .set_json(json!({"interests": "web"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("invalid request body"));

        let req = as_admin(TestRequest::patch().uri("/api/admin/applications/x/status"))
            .set_json(json!({"status": "archived"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);

        let req = TestRequest::get().uri("/api/events?when=someday").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("invalid query"));
    }

    #[actix_web::test]
    async fn test_availability() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let req = TestRequest::post()
            .uri("/api/applications")
            .set_json(application_form("taken@uni.edu", "IT2001"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = TestRequest::get()
            .uri("/api/applications/availability?email=Taken@uni.edu&studentIndexId=IT3003")
            .to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["emailTaken"], true);
        assert_eq!(body["studentIndexIdTaken"], false);
    }

    #[actix_web::test]
    async fn test_admin_gate() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);

        let req = TestRequest::get().uri("/api/admin/applications").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");

        let req = TestRequest::get()
            .uri("/api/admin/applications")
            .insert_header((ADMIN_EMAIL_HEADER, ADMIN.0))
            .insert_header((ADMIN_PASSWORD_HEADER, "wrong"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = TestRequest::get()
            .uri("/api/admin/applications")
            .insert_header((ADMIN_EMAIL_HEADER, "member@club.test"))
            .insert_header((ADMIN_PASSWORD_HEADER, "member-secret"))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = as_admin(TestRequest::get().uri("/api/admin/applications")).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["total"], 0);
    }

    #[actix_web::test]
    async fn test_review_flow() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer.clone());
        for (email, sid) in [("ann@uni.edu", "IT1"), ("bob@uni.edu", "IT2")] {
            let req = TestRequest::post()
                .uri("/api/applications")
                .set_json(application_form(email, sid))
                .to_request();
            assert_eq!(call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = as_admin(TestRequest::get().uri("/api/admin/applications?search=BOB")).to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["total"], 1);
        let id = body["list"][0]["id"].as_str().unwrap().to_owned();

        let req = as_admin(TestRequest::patch().uri(&format!("/api/admin/applications/{}/status", id)))
            .set_json(json!({"status": "approved"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["application"]["status"], "approved");
        assert_eq!(body["emailSent"], true);
        assert!(mailer.sent().iter().any(|m| m.to == "bob@uni.edu" && m.html.contains("https://chat.example.com/default")));

        let req = as_admin(TestRequest::delete().uri(&format!("/api/admin/applications/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        let req = as_admin(TestRequest::get().uri(&format!("/api/admin/applications/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_member_admin_flow() {
        let (store, mailer) = seeded().await;
        let app = app!(store.clone(), mailer);
        let form = json!({"fullName": "Nimal Perera", "email": "nimal@uni.edu", "password": "nimal-secret", "role": "secretary"});

        let req = as_admin(TestRequest::post().uri("/api/admin/users")).set_json(&form).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = read_body_json(resp).await;
        assert!(body.get("password").is_none());
        let id = body["id"].as_str().unwrap().to_owned();

        let req = as_admin(TestRequest::post().uri("/api/admin/users")).set_json(&form).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = as_admin(TestRequest::put().uri(&format!("/api/admin/users/{}", id)))
            .set_json(json!({"fullName": "Nimal P.", "email": "nimal@uni.edu", "role": "member"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["fullName"], "Nimal P.");
        assert_eq!(body["role"], "member");

        // overwrite without a password keeps the old one
        let req = TestRequest::post()
            .uri("/api/auth/sign-in")
            .set_json(json!({"email": "nimal@uni.edu", "password": "nimal-secret"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["isAdmin"], false);

        let admin_id = UserCommon::get_by_email(store.get_ref(), ADMIN.0).await.unwrap().unwrap().id;
        let req = as_admin(TestRequest::delete().uri(&format!("/api/admin/users/{}", admin_id))).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);

        let req = as_admin(TestRequest::delete().uri(&format!("/api/admin/users/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        let req = as_admin(TestRequest::get().uri(&format!("/api/admin/users/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let req = as_admin(TestRequest::get().uri("/api/admin/users")).to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["total"], 2);
    }

    #[actix_web::test]
    async fn test_event_admin_flow() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let date = (Utc::now().date_naive() + Duration::days(7)).to_string();

        let req = as_admin(TestRequest::post().uri("/api/admin/events"))
            .set_json(json!({"eventName": "Arduino 101", "eventType": "Workshop", "venue": "Lab 3"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_body_json(resp).await;
        assert!(body["fields"]["eventDate"].is_string());

        let req = as_admin(TestRequest::post().uri("/api/admin/events"))
            .set_json(json!({"eventName": "Arduino 101", "eventType": "Workshop", "venue": "Lab 3", "eventDate": date}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["isActive"], true);
        let id = body["eventId"].as_str().unwrap().to_owned();

        let req = as_admin(TestRequest::put().uri(&format!("/api/admin/events/{}", id)))
            .set_json(json!({"eventName": "Arduino 102", "eventType": "Workshop", "venue": "Lab 4", "eventDate": date}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["eventName"], "Arduino 102");
        assert_eq!(body["eventId"], id.as_str());

        let req = TestRequest::get().uri("/api/events").to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["total"], 1);

        let req = as_admin(TestRequest::patch().uri(&format!("/api/admin/events/{}/active", id)))
            .set_json(json!({"isActive": false}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["isActive"], false);

        let req = TestRequest::get().uri(&format!("/api/events/{}", id)).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let req = TestRequest::get().uri("/api/events").to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["total"], 0);
        let req = as_admin(TestRequest::get().uri("/api/admin/events")).to_request();
        let body: Value = read_body_json(call_service(&app, req).await).await;
        assert_eq!(body["total"], 1);

        let req = as_admin(TestRequest::delete().uri(&format!("/api/admin/events/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        let req = as_admin(TestRequest::delete().uri(&format!("/api/admin/events/{}", id))).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_sign_in() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let req = TestRequest::post()
            .uri("/api/auth/sign-in")
            .set_json(json!({"email": "Admin@Club.test", "password": ADMIN.1}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["isAdmin"], true);
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("salt").is_none());

        let req = TestRequest::post()
            .uri("/api/auth/sign-in")
            .set_json(json!({"email": ADMIN.0, "password": "nope"}))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_community_link_setting() {
        let (store, mailer) = seeded().await;
        let app = app!(store.clone(), mailer);
        let req = as_admin(TestRequest::put().uri(&format!("/api/admin/settings/{}", COMMUNITY_LINK_KEY)))
            .set_json(json!({"value": "https://chat.example.com/new"}))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(
            store.get_setting(COMMUNITY_LINK_KEY).await.unwrap().as_deref(),
            Some("https://chat.example.com/new")
        );
    }

    #[actix_web::test]
    async fn test_notification_failure() {
        let (store, _) = seeded().await;
        let app = app!(store, Data::new(RecordingMailer::failing()));
        let req = TestRequest::post()
            .uri("/api/notifications/approval")
            .set_json(json!({"name": "Ann", "email": "ann@uni.edu"}))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_upload() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let body = "--BOUNDARY\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"poster.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --BOUNDARY--\r\n";
        let req = as_admin(TestRequest::post().uri("/api/admin/uploads"))
            .insert_header(("Content-Type", "multipart/form-data; boundary=BOUNDARY"))
            .set_payload(body)
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let urls: Vec<String> = read_body_json(resp).await;
        assert_eq!(urls.len(), 1);
        assert!(urls[0].starts_with("https://images.test/") && urls[0].ends_with(".png"));
    }

    #[actix_web::test]
    async fn test_preflight() {
        let (store, mailer) = seeded().await;
        let app = app!(store, mailer);
        let req = TestRequest::default().method(Method::OPTIONS).uri("/api/admin/applications").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
        assert!(resp
            .headers()
            .get("Access-Control-Allow-Headers")
            .unwrap()
            .to_str()
            .unwrap()
            .contains(ADMIN_PASSWORD_HEADER));
    }
}
