pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Environment;

/// Build the full application router with global layers applied
pub fn app() -> Router {
    let config = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Everything under /api goes through the JWT gate
        .merge(api_routes());

    if config.security.enable_cors {
        router = router.layer(cors_layer());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::{auth, auth_vecino, bootstrap};

    Router::new()
        // Employee authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/cambiar-password-inicial", post(auth::cambiar_password_inicial))
        .route("/auth/verificar-token", post(auth::verificar_token))
        // Resident portal authentication
        .route("/auth-vecino/login", post(auth_vecino::login))
        // First-run administrator bootstrap
        .route("/admin/bootstrap", get(bootstrap::status).post(bootstrap::create))
}

fn api_routes() -> Router {
    use axum::routing::put;
    use handlers::protected::{archivos, auth, denuncias, empleados, tramites, vecinos};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami))
        .route("/api/empleados", get(empleados::list).post(empleados::create))
        .route(
            "/api/empleados/:id",
            get(empleados::get).put(empleados::update).delete(empleados::deactivate),
        )
        .route("/api/empleados/:id/restaurar-clave", put(empleados::restaurar_clave))
        .route("/api/vecinos", get(vecinos::list).post(vecinos::create))
        .route(
            "/api/vecinos/:id",
            get(vecinos::get).put(vecinos::update).delete(vecinos::delete),
        )
        .route("/api/tramites", get(tramites::list).post(tramites::create))
        .route(
            "/api/tramites/:id",
            get(tramites::get).put(tramites::update).delete(tramites::delete),
        )
        .route("/api/denuncias", get(denuncias::list).post(denuncias::create))
        .route(
            "/api/denuncias/:id",
            get(denuncias::get).put(denuncias::update).delete(denuncias::delete),
        )
        .route("/api/archivos", get(archivos::list).post(archivos::register))
        .route("/api/archivos/:id", get(archivos::get).delete(archivos::delete))
        .layer(axum::middleware::from_fn(middleware::auth::jwt_auth))
}

fn cors_layer() -> CorsLayer {
    let config = config::config();

    // Anything goes during local development; configured origins elsewhere
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Muni API",
            "version": version,
            "description": "Municipal back-office REST API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/login, /auth/cambiar-password-inicial, /auth/verificar-token (public)",
                "auth_vecino": "/auth-vecino/login (public)",
                "bootstrap": "/admin/bootstrap (public, first run only)",
                "whoami": "/api/auth/whoami (protected)",
                "empleados": "/api/empleados[/:id] (protected)",
                "vecinos": "/api/vecinos[/:id] (protected)",
                "tramites": "/api/tramites[/:id] (protected)",
                "denuncias": "/api/denuncias[/:id] (protected)",
                "archivos": "/api/archivos[/:id] (protected)"
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
