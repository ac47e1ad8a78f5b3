//! End-to-end route tests over in-memory implementations.
//!
//! The full production app factory is exercised against the mock user
//! repository and notification channel, covering login, refresh, admin
//! gating, key export, and the rotation cutover.

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::{json, Value};

use kg_api::app::create_app;
use kg_api::routes::auth::AppState;
use kg_core::repositories::MockUserRepository;
use kg_core::services::auth::AuthService;
use kg_core::services::keys::KeyStore;
use kg_core::services::rotation::{
    MockNotificationChannel, NotificationChannel, RotationConfig, RotationService,
};
use kg_core::services::token::{TokenService, TokenServiceConfig};

const ADMIN_USERNAME: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "Admin1234";
const EXCHANGE: &str = "auth_events";

async fn test_state() -> (
    web::Data<AppState<MockUserRepository>>,
    Arc<MockNotificationChannel>,
) {
    let users = Arc::new(MockUserRepository::new());
    let key_store = Arc::new(KeyStore::new());
    key_store.ensure_keypair(65537, 2048).unwrap();

    let auth_service = Arc::new(AuthService::new(Arc::clone(&users)));
    auth_service
        .register(ADMIN_USERNAME, ADMIN_PASSWORD, "admin")
        .await
        .unwrap();

    let token_service = Arc::new(TokenService::new(
        Arc::clone(&key_store),
        TokenServiceConfig::default(),
    ));
    let channel = Arc::new(MockNotificationChannel::new());
    let rotation_service = Arc::new(RotationService::new(
        Arc::clone(&key_store),
        Arc::clone(&channel) as Arc<dyn NotificationChannel>,
        RotationConfig {
            exponent: 65537,
            bits: 2048,
            exchange: EXCHANGE.to_string(),
        },
    ));

    (
        web::Data::new(AppState {
            auth_service,
            token_service,
            rotation_service,
            key_store,
        }),
        channel,
    )
}

async fn login<S, B>(app: &S, username: &str, password: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "login failed: {}", resp.status());
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn test_health_reports_ready_keys() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/health")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["keys_initialized"], true);
}

#[actix_rt::test]
async fn test_login_returns_token_pair() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let body = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;

    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 900);
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert!(body["refresh_token"].as_str().unwrap().contains('.'));
}

#[actix_rt::test]
async fn test_login_wrong_password_is_generic_401() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": ADMIN_USERNAME, "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[actix_rt::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "ghost@example.com", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_credentials");
}

#[actix_rt::test]
async fn test_refresh_issues_new_pair() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let tokens = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": tokens["refresh_token"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
}

#[actix_rt::test]
async fn test_refresh_rejects_access_token() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let tokens = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": tokens["access_token"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_register_requires_token() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "username": "new@example.com",
            "password": "Passw0rd!",
            "role": "client"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_register_requires_admin_role() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state.clone())).await;

    // An admin provisions a regular client, which then tries to register.
    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((
            "Authorization",
            format!("Bearer {}", admin["access_token"].as_str().unwrap()),
        ))
        .set_json(json!({
            "username": "client@example.com",
            "password": "Passw0rd!",
            "role": "client"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let client = login(&app, "client@example.com", "Passw0rd!").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((
            "Authorization",
            format!("Bearer {}", client["access_token"].as_str().unwrap()),
        ))
        .set_json(json!({
            "username": "other@example.com",
            "password": "Passw0rd!",
            "role": "client"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "insufficient_permissions");
}

#[actix_rt::test]
async fn test_register_never_returns_password_hash() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((
            "Authorization",
            format!("Bearer {}", admin["access_token"].as_str().unwrap()),
        ))
        .set_json(json!({
            "username": "new@example.com",
            "password": "Passw0rd!",
            "role": "client"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "new@example.com");
    assert_eq!(body["role"], "client");
    assert_eq!(body["status"], "active");
    assert!(body.get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_public_key_export() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/key")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    let pem = body["public_key"].as_str().unwrap();
    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
    assert!(!pem.contains("PRIVATE"));
}

#[actix_rt::test]
async fn test_rotation_cutover() {
    let (state, channel) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let before = {
        let req = test::TestRequest::get()
            .uri("/api/v1/auth/key")
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        body["public_key"].as_str().unwrap().to_string()
    };

    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let old_access = admin["access_token"].as_str().unwrap().to_string();

    // Rotate with the current admin token.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/rotate")
        .insert_header(("Authorization", format!("Bearer {}", old_access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["broadcast"], true);
    assert_ne!(body["public_key"].as_str().unwrap(), before);

    // The rotation event went out on the fanout exchange.
    let messages = channel.published();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].exchange, EXCHANGE);

    // The exported key now matches the rotated one.
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/key")
        .to_request();
    let after: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(after["public_key"], body["public_key"]);

    // Tokens signed by the old key are dead.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/rotate")
        .insert_header(("Authorization", format!("Bearer {}", old_access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // A fresh login works against the new key.
    let fresh = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    assert!(fresh["access_token"].as_str().unwrap().contains('.'));
}

#[actix_rt::test]
async fn test_rotation_survives_broadcast_failure() {
    let (state, channel) = test_state().await;
    let app = test::init_service(create_app(state.clone())).await;
    channel.set_failing(true);

    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/rotate")
        .insert_header((
            "Authorization",
            format!("Bearer {}", admin["access_token"].as_str().unwrap()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Partial success: the key changed even though nobody heard about it.
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["broadcast"], false);
    assert!(body["broadcast_error"].as_str().is_some());
    assert_eq!(
        state.key_store.public_key_pem().unwrap(),
        body["public_key"].as_str().unwrap()
    );
}

#[actix_rt::test]
async fn test_rotate_requires_admin() {
    let (state, _) = test_state().await;
    let app = test::init_service(create_app(state)).await;

    let admin = login(&app, ADMIN_USERNAME, ADMIN_PASSWORD).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((
            "Authorization",
            format!("Bearer {}", admin["access_token"].as_str().unwrap()),
        ))
        .set_json(json!({
            "username": "client@example.com",
            "password": "Passw0rd!",
            "role": "client"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let client = login(&app, "client@example.com", "Passw0rd!").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/rotate")
        .insert_header((
            "Authorization",
            format!("Bearer {}", client["access_token"].as_str().unwrap()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
}
