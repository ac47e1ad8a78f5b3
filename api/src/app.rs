//! Application factory
//!
//! Builds the Actix-web application from a prepared [`AppState`]. Extracted
//! from `main` so integration tests can assemble the exact production app
//! over in-memory implementations.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    health::health, login::login, public_key::public_key, refresh::refresh, register::register,
    rotate::rotate, AppState,
};

use kg_core::repositories::UserRepository;

/// Create and configure the application with all dependencies
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
{
    let cors = create_cors();
    let token_service = Arc::clone(&app_state.token_service);

    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        .wrap(cors)
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/login", web::post().to(login::<U>))
                    .route("/refresh", web::post().to(refresh::<U>))
                    .route(
                        "/register",
                        web::post()
                            .to(register::<U>)
                            .wrap(JwtAuth::new(Arc::clone(&token_service))),
                    )
                    .route(
                        "/rotate",
                        web::post()
                            .to(rotate::<U>)
                            .wrap(JwtAuth::new(token_service)),
                    )
                    .route("/key", web::get().to(public_key::<U>))
                    .route("/health", web::get().to(health::<U>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
