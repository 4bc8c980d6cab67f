use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::{password, Rol};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::Empleado;
use crate::database::repositories::empleados::{EmpleadoUpdate, NewEmpleado};
use crate::database::repositories::EmpleadoRepository;
use crate::error::ApiError;
use crate::handlers::public::utils::{normalize_email, validate_email_format};
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/empleados - Active employees for the back-office panel
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Empleado>> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let empleados = EmpleadoRepository::new(pool).list_active().await?;
    Ok(ApiResponse::success(empleados))
}

/// GET /api/empleados/:id
pub async fn get(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Empleado> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let empleado = EmpleadoRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Empleado not found"))?;
    Ok(ApiResponse::success(empleado))
}

#[derive(Debug, Deserialize)]
pub struct CreateEmpleadoRequest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub dni: String,
    pub password: String,
    pub rol: String,
}

/// POST /api/empleados - Register an employee (admin only).
/// New accounts must replace the assigned password at first login.
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateEmpleadoRequest>,
) -> ApiResult<Empleado> {
    user.require_rol(Rol::Admin)?;

    let mut field_errors = validate_common_fields(&payload.nombre, &payload.apellido, &payload.email, &payload.rol);
    if payload.dni.trim().is_empty() {
        field_errors.insert("dni".to_string(), "DNI is required".to_string());
    }
    if payload.password.len() < password::MIN_PASSWORD_LENGTH {
        field_errors.insert(
            "password".to_string(),
            format!("Password must be at least {} characters", password::MIN_PASSWORD_LENGTH),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Validation failed", Some(field_errors)));
    }

    let cost = config::config().security.bcrypt_cost;
    let pool = DatabaseManager::pool().await?;
    let empleado = EmpleadoRepository::new(pool)
        .insert(NewEmpleado {
            nombre: payload.nombre.trim().to_string(),
            apellido: payload.apellido.trim().to_string(),
            email: normalize_email(&payload.email),
            dni: payload.dni.trim().to_string(),
            rol: payload.rol,
            password_hash: password::hash_password(&payload.password, cost)?,
            requiere_cambio_password: true,
        })
        .await?;

    tracing::info!(email = %empleado.email, rol = %empleado.rol, created_by = %user.email, "empleado created");
    Ok(ApiResponse::created(empleado))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmpleadoRequest {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    pub rol: String,
}

/// PUT /api/empleados/:id (admin only)
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmpleadoRequest>,
) -> ApiResult<Empleado> {
    user.require_rol(Rol::Admin)?;

    let field_errors = validate_common_fields(&payload.nombre, &payload.apellido, &payload.email, &payload.rol);
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Validation failed", Some(field_errors)));
    }

    let pool = DatabaseManager::pool().await?;
    let empleado = EmpleadoRepository::new(pool)
        .update(
            id,
            EmpleadoUpdate {
                nombre: payload.nombre.trim().to_string(),
                apellido: payload.apellido.trim().to_string(),
                email: normalize_email(&payload.email),
                rol: payload.rol,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Empleado not found"))?;

    tracing::info!(id = %id, updated_by = %user.email, "empleado updated");
    Ok(ApiResponse::success(empleado))
}

/// DELETE /api/empleados/:id - Soft delete (admin only)
pub async fn deactivate(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    user.require_rol(Rol::Admin)?;

    let pool = DatabaseManager::pool().await?;
    let deactivated = EmpleadoRepository::new(pool).deactivate(id).await?;
    if !deactivated {
        return Err(ApiError::not_found("Empleado not found"));
    }

    tracing::info!(id = %id, deactivated_by = %user.email, "empleado deactivated");
    Ok(ApiResponse::success(json!({ "id": id, "activo": false })))
}

#[derive(Debug, Deserialize)]
pub struct RestaurarClaveRequest {
    pub nueva_clave: String,
}

/// PUT /api/empleados/:id/restaurar-clave - Admin-assigned password reset.
/// The account is flagged to change the assigned password at next login and
/// its failed-attempt counter is cleared.
pub async fn restaurar_clave(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestaurarClaveRequest>,
) -> ApiResult<Value> {
    user.require_rol(Rol::Admin)?;

    if payload.nueva_clave.len() < password::MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "The new password must be at least {} characters",
            password::MIN_PASSWORD_LENGTH
        )));
    }

    let cost = config::config().security.bcrypt_cost;
    let hash = password::hash_password(&payload.nueva_clave, cost)?;

    let pool = DatabaseManager::pool().await?;
    let updated = EmpleadoRepository::new(pool).set_password(id, &hash, true).await?;
    if !updated {
        return Err(ApiError::not_found("Empleado not found"));
    }

    tracing::info!(id = %id, restored_by = %user.email, "empleado password restored");
    Ok(ApiResponse::success(json!({
        "id": id,
        "requiere_cambio_password": true
    })))
}

fn validate_common_fields(
    nombre: &str,
    apellido: &str,
    email: &str,
    rol: &str,
) -> HashMap<String, String> {
    let mut field_errors = HashMap::new();

    if nombre.trim().len() < 2 {
        field_errors.insert("nombre".to_string(), "Must be at least 2 characters".to_string());
    }
    if apellido.trim().len() < 2 {
        field_errors.insert("apellido".to_string(), "Must be at least 2 characters".to_string());
    }
    if let Err(msg) = validate_email_format(email.trim()) {
        field_errors.insert("email".to_string(), msg);
    }
    match Rol::parse(rol) {
        Some(rol) if rol.is_back_office() => {}
        _ => {
            field_errors.insert("rol".to_string(), "Must be one of: admin, empleado".to_string());
        }
    }

    field_errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_fields() {
        let errors = validate_common_fields("Marta", "Quiroga", "mq@municipalidad.gob.ar", "empleado");
        assert!(errors.is_empty());
    }

    #[test]
    fn flags_each_invalid_field() {
        let errors = validate_common_fields("M", "", "no-email", "vecino");
        assert!(errors.contains_key("nombre"));
        assert!(errors.contains_key("apellido"));
        assert!(errors.contains_key("email"));
        // vecino accounts are not created through the employee endpoint
        assert!(errors.contains_key("rol"));
    }
}
