use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Archivo;
use crate::database::repositories::archivos::NewArchivo;
use crate::database::repositories::ArchivoRepository;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/archivos - Registered file records, newest upload first
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Archivo>> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let archivos = ArchivoRepository::new(pool).list().await?;
    Ok(ApiResponse::success(archivos))
}

/// GET /api/archivos/:id
pub async fn get(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Archivo> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let archivo = ArchivoRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Archivo not found"))?;
    Ok(ApiResponse::success(archivo))
}

#[derive(Debug, Deserialize)]
pub struct RegisterArchivoRequest {
    pub entidad_origen: String,
    pub origen_id: Uuid,
    pub nombre_archivo: String,
    pub ruta_archivo: String,
    pub tipo_mime: String,
}

/// POST /api/archivos - Register file metadata.
/// Bytes are stored elsewhere; a second registration of the same name for the
/// same entity is a 409.
pub async fn register(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RegisterArchivoRequest>,
) -> ApiResult<Archivo> {
    user.require_back_office()?;

    let mut field_errors = HashMap::new();
    for (field, value) in [
        ("entidad_origen", &payload.entidad_origen),
        ("nombre_archivo", &payload.nombre_archivo),
        ("ruta_archivo", &payload.ruta_archivo),
        ("tipo_mime", &payload.tipo_mime),
    ] {
        if value.trim().is_empty() {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Validation failed", Some(field_errors)));
    }

    let pool = DatabaseManager::pool().await?;
    let archivo = ArchivoRepository::new(pool)
        .insert(NewArchivo {
            entidad_origen: payload.entidad_origen.trim().to_string(),
            origen_id: payload.origen_id,
            nombre_archivo: payload.nombre_archivo.trim().to_string(),
            ruta_archivo: payload.ruta_archivo.trim().to_string(),
            tipo_mime: payload.tipo_mime.trim().to_string(),
        })
        .await?;

    tracing::info!(id = %archivo.id, entidad = %archivo.entidad_origen, registered_by = %user.email, "archivo registered");
    Ok(ApiResponse::created(archivo))
}

/// DELETE /api/archivos/:id - Remove a record, leaving an audit row
pub async fn delete(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Value> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let archivo = ArchivoRepository::new(pool)
        .delete_with_audit(id, "manual")
        .await?
        .ok_or_else(|| ApiError::not_found("Archivo not found"))?;

    tracing::info!(id = %id, nombre = %archivo.nombre_archivo, deleted_by = %user.email, "archivo deleted");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
