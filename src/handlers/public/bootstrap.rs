use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::utils::{normalize_email, validate_email_format};
use crate::auth::password;
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repositories::empleados::NewEmpleado;
use crate::database::repositories::EmpleadoRepository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct BootstrapStatus {
    /// True while no active administrator exists and bootstrap is open
    pub sistema_virgen: bool,
}

/// GET /admin/bootstrap - Report whether the first admin can still be created
pub async fn status() -> ApiResult<BootstrapStatus> {
    let pool = DatabaseManager::pool().await?;
    let admins = EmpleadoRepository::new(pool).count_active_admins().await?;

    let sistema_virgen = admins == 0;
    tracing::info!(sistema_virgen, "bootstrap status checked");

    Ok(ApiResponse::success(BootstrapStatus { sistema_virgen }))
}

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    pub id: Uuid,
    pub email: String,
    pub rol: String,
}

/// POST /admin/bootstrap - Create the first superadministrator.
/// Closed permanently once any active admin exists.
pub async fn create(Json(payload): Json<BootstrapRequest>) -> ApiResult<BootstrapResponse> {
    validate_email_format(payload.email.trim()).map_err(|msg| {
        let mut field_errors = HashMap::new();
        field_errors.insert("email".to_string(), msg);
        ApiError::validation_error("Validation failed", Some(field_errors))
    })?;
    password::validate_password_strength(&payload.password).map_err(|problems| {
        let mut field_errors = HashMap::new();
        field_errors.insert("password".to_string(), problems.join("; "));
        ApiError::validation_error("Validation failed", Some(field_errors))
    })?;

    let pool = DatabaseManager::pool().await?;
    let repo = EmpleadoRepository::new(pool);

    if repo.count_active_admins().await? > 0 {
        tracing::warn!("bootstrap refused: an active administrator already exists");
        return Err(ApiError::forbidden(
            "An active administrator already exists; bootstrap is disabled",
        ));
    }

    let cost = config::config().security.bcrypt_cost;
    let admin = repo
        .insert(NewEmpleado {
            nombre: "Superadministrador".to_string(),
            apellido: "Sistema".to_string(),
            email: normalize_email(&payload.email),
            dni: "00000000".to_string(),
            rol: "admin".to_string(),
            password_hash: password::hash_password(&payload.password, cost)?,
            // The bootstrap password was chosen by its owner, not assigned
            requiere_cambio_password: false,
        })
        .await?;

    tracing::info!(email = %admin.email, "superadministrator created");

    Ok(ApiResponse::created(BootstrapResponse {
        id: admin.id,
        email: admin.email,
        rol: admin.rol,
    }))
}
