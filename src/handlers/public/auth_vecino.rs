use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{self, Claims, Rol, password};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::VecinoRepository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginVecinoRequest {
    /// Email address or DNI
    pub identificador: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct VecinoResumen {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub dni: String,
}

#[derive(Debug, Serialize)]
pub struct LoginVecinoResponse {
    pub token: String,
    pub expires_in: u64,
    pub vecino: VecinoResumen,
}

/// POST /auth-vecino/login - Resident portal login by email or DNI.
/// Residents without portal credentials (no stored hash) get the same 401 as
/// a wrong password.
pub async fn login(Json(payload): Json<LoginVecinoRequest>) -> ApiResult<LoginVecinoResponse> {
    if payload.identificador.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Identifier and password are required"));
    }
    let identificador = payload.identificador.trim();

    let pool = DatabaseManager::pool().await?;
    let repo = VecinoRepository::new(pool);

    let Some(vecino) = repo.find_by_identificador(identificador).await? else {
        tracing::warn!(identificador = %identificador, "vecino login failed: unknown account");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let Some(hash) = vecino.password_hash.as_deref() else {
        tracing::warn!(identificador = %identificador, "vecino login failed: no portal access");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !password::verify_password(&payload.password, hash)? {
        tracing::warn!(identificador = %identificador, "vecino login failed: wrong password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let security = &config::config().security;
    let claims = Claims::new(vecino.id, vecino.email.clone(), Rol::Vecino, security.jwt_expiry_hours);
    let token = auth::sign_token(&claims, &security.jwt_secret)?;

    tracing::info!(email = %vecino.email, "vecino login successful");

    Ok(ApiResponse::success(LoginVecinoResponse {
        token,
        expires_in: security.jwt_expiry_hours * 3600,
        vecino: VecinoResumen {
            id: vecino.id,
            nombre: vecino.nombre,
            apellido: vecino.apellido,
            email: vecino.email,
            dni: vecino.dni,
        },
    }))
}
