use actix_web::{web, HttpResponse};

use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for GET /api/v1/auth/health
///
/// Liveness probe; also reports whether signing keys are ready so an
/// orchestrator can hold traffic until the first keypair exists.
pub async fn health<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "keygate-api",
        "version": env!("CARGO_PKG_VERSION"),
        "keys_initialized": state.key_store.is_initialized(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
