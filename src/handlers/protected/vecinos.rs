use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Vecino;
use crate::database::repositories::vecinos::{NewVecino, VecinoUpdate};
use crate::database::repositories::VecinoRepository;
use crate::error::ApiError;
use crate::handlers::public::utils::{normalize_email, validate_email_format};
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/vecinos - Residents ordered by surname
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Vecino>> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let vecinos = VecinoRepository::new(pool).list().await?;
    Ok(ApiResponse::success(vecinos))
}

/// GET /api/vecinos/:id
pub async fn get(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Vecino> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let vecino = VecinoRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vecino not found"))?;
    Ok(ApiResponse::success(vecino))
}

#[derive(Debug, Deserialize)]
pub struct VecinoRequest {
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub cuil_cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
}

impl VecinoRequest {
    fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.nombre.trim().is_empty() {
            field_errors.insert("nombre".to_string(), "Name is required".to_string());
        }
        if self.apellido.trim().is_empty() {
            field_errors.insert("apellido".to_string(), "Surname is required".to_string());
        }
        if self.dni.trim().is_empty() {
            field_errors.insert("dni".to_string(), "DNI is required".to_string());
        }
        if let Err(msg) = validate_email_format(self.email.trim()) {
            field_errors.insert("email".to_string(), msg);
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Validation failed", Some(field_errors)))
        }
    }
}

/// POST /api/vecinos - Register a resident. Duplicate email or DNI is a 409.
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<VecinoRequest>,
) -> ApiResult<Vecino> {
    user.require_back_office()?;
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let vecino = VecinoRepository::new(pool)
        .insert(NewVecino {
            nombre: payload.nombre.trim().to_string(),
            apellido: payload.apellido.trim().to_string(),
            dni: payload.dni.trim().to_string(),
            cuil_cuit: payload.cuil_cuit,
            domicilio: payload.domicilio,
            telefono: payload.telefono,
            email: normalize_email(&payload.email),
        })
        .await?;

    tracing::info!(dni = %vecino.dni, created_by = %user.email, "vecino created");
    Ok(ApiResponse::created(vecino))
}

/// PUT /api/vecinos/:id
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<VecinoRequest>,
) -> ApiResult<Vecino> {
    user.require_back_office()?;
    payload.validate()?;

    let pool = DatabaseManager::pool().await?;
    let vecino = VecinoRepository::new(pool)
        .update(
            id,
            VecinoUpdate {
                nombre: payload.nombre.trim().to_string(),
                apellido: payload.apellido.trim().to_string(),
                dni: payload.dni.trim().to_string(),
                cuil_cuit: payload.cuil_cuit,
                domicilio: payload.domicilio,
                telefono: payload.telefono,
                email: normalize_email(&payload.email),
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Vecino not found"))?;

    tracing::info!(id = %id, updated_by = %user.email, "vecino updated");
    Ok(ApiResponse::success(vecino))
}

/// DELETE /api/vecinos/:id
pub async fn delete(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Value> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let deleted = VecinoRepository::new(pool).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Vecino not found"));
    }

    tracing::info!(id = %id, deleted_by = %user.email, "vecino deleted");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
