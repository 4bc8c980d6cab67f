use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::utils::{normalize_email, validate_email_format};
use crate::auth::{self, password, Claims, Rol};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::EmpleadoRepository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UsuarioResumen {
    pub id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: String,
    pub ultimo_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub usuario: UsuarioResumen,
}

/// POST /auth/login - Authenticate an employee and receive a JWT
///
/// Credential failures are deliberately indistinguishable (401) so the
/// endpoint does not reveal which accounts exist. An account flagged for an
/// initial password change is refused with 403 PASSWORD_CHANGE_REQUIRED
/// until it calls /auth/cambiar-password-inicial.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }
    let email = normalize_email(&payload.email);

    let pool = DatabaseManager::pool().await?;
    let repo = EmpleadoRepository::new(pool);

    let Some(empleado) = repo.find_by_email(&email).await? else {
        tracing::warn!(email = %email, "login failed: unknown account");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !empleado.activo {
        tracing::warn!(email = %email, "login refused: inactive account");
        return Err(ApiError::forbidden("Account is inactive"));
    }

    if !password::verify_password(&payload.password, &empleado.password_hash)? {
        repo.record_login_failure(empleado.id).await?;
        tracing::warn!(email = %email, "login failed: wrong password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if empleado.requiere_cambio_password {
        tracing::warn!(email = %email, "login blocked: initial password change pending");
        return Err(ApiError::password_change_required(
            "The initial password must be replaced before logging in",
        ));
    }

    repo.record_login_success(empleado.id).await?;

    let rol = Rol::parse(&empleado.rol)
        .ok_or_else(|| ApiError::internal_server_error("Account has an unknown role"))?;
    let security = &config::config().security;
    let claims = Claims::new(empleado.id, empleado.email.clone(), rol, security.jwt_expiry_hours);
    let token = auth::sign_token(&claims, &security.jwt_secret)?;

    tracing::info!(email = %email, rol = %rol, "login successful");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: security.jwt_expiry_hours * 3600,
        usuario: UsuarioResumen {
            id: empleado.id,
            nombre: empleado.nombre,
            apellido: empleado.apellido,
            email: empleado.email,
            rol: empleado.rol,
            ultimo_login: empleado.ultimo_login,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct CambioPasswordRequest {
    pub email: String,
    pub password_actual: String,
    pub nueva_password: String,
}

#[derive(Debug, Serialize)]
pub struct CambioPasswordResponse {
    pub email: String,
    pub requiere_cambio_password: bool,
}

/// POST /auth/cambiar-password-inicial - Replace an initial password
///
/// Only accounts flagged with `requiere_cambio_password` may use this; the
/// current password must still verify, and the new one must pass the full
/// strength rules.
pub async fn cambiar_password_inicial(
    Json(payload): Json<CambioPasswordRequest>,
) -> ApiResult<CambioPasswordResponse> {
    validate_email_format(payload.email.trim())
        .map_err(|msg| field_error("email", msg))?;
    password::validate_password_strength(&payload.nueva_password)
        .map_err(|problems| field_error("nueva_password", problems.join("; ")))?;

    let email = normalize_email(&payload.email);

    let pool = DatabaseManager::pool().await?;
    let repo = EmpleadoRepository::new(pool);

    let Some(empleado) = repo.find_by_email(&email).await? else {
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !empleado.activo {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    if !password::verify_password(&payload.password_actual, &empleado.password_hash)? {
        tracing::warn!(email = %email, "initial password change failed: wrong current password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    if !empleado.requiere_cambio_password {
        return Err(ApiError::bad_request("No password change is required for this account"));
    }

    let cost = config::config().security.bcrypt_cost;
    let hash = password::hash_password(&payload.nueva_password, cost)?;
    repo.set_password(empleado.id, &hash, false).await?;

    tracing::info!(email = %email, "initial password replaced");

    Ok(ApiResponse::success(CambioPasswordResponse {
        email,
        requiere_cambio_password: false,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerificarTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenUsuario {
    pub id: Uuid,
    pub email: String,
    pub rol: Rol,
}

#[derive(Debug, Serialize)]
pub struct VerificarTokenResponse {
    pub valido: bool,
    pub usuario: TokenUsuario,
    pub expira: Option<DateTime<Utc>>,
}

/// POST /auth/verificar-token - Check a token without touching any record
pub async fn verificar_token(
    Json(payload): Json<VerificarTokenRequest>,
) -> ApiResult<VerificarTokenResponse> {
    if payload.token.trim().is_empty() {
        return Err(ApiError::bad_request("Token is required"));
    }

    let secret = &config::config().security.jwt_secret;
    let claims = auth::verify_token(payload.token.trim(), secret)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    Ok(ApiResponse::success(VerificarTokenResponse {
        valido: true,
        usuario: TokenUsuario {
            id: claims.sub,
            email: claims.email,
            rol: claims.rol,
        },
        expira: DateTime::from_timestamp(claims.exp, 0),
    }))
}

fn field_error(field: &str, message: String) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert(field.to_string(), message);
    ApiError::validation_error("Validation failed", Some(field_errors))
}
