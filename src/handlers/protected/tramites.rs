use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{EstadoTramite, Tramite};
use crate::database::repositories::tramites::NewTramite;
use crate::database::repositories::TramiteRepository;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/tramites - Most recently opened first
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Tramite>> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let tramites = TramiteRepository::new(pool).list().await?;
    Ok(ApiResponse::success(tramites))
}

/// GET /api/tramites/:id
pub async fn get(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Tramite> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let tramite = TramiteRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tramite not found"))?;
    Ok(ApiResponse::success(tramite))
}

#[derive(Debug, Deserialize)]
pub struct CreateTramiteRequest {
    pub vecino_id: Uuid,
    pub tipo: String,
    pub descripcion: String,
}

/// POST /api/tramites - Open a procedure for a resident.
/// An unknown vecino_id surfaces as a 409 via the foreign key.
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTramiteRequest>,
) -> ApiResult<Tramite> {
    user.require_back_office()?;

    if payload.tipo.trim().is_empty() || payload.descripcion.trim().is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let pool = DatabaseManager::pool().await?;
    let tramite = TramiteRepository::new(pool)
        .insert(NewTramite {
            vecino_id: payload.vecino_id,
            tipo: payload.tipo.trim().to_string(),
            descripcion: payload.descripcion.trim().to_string(),
        })
        .await?;

    tracing::info!(id = %tramite.id, vecino_id = %tramite.vecino_id, created_by = %user.email, "tramite created");
    Ok(ApiResponse::created(tramite))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTramiteRequest {
    pub estado: String,
    pub resultado: Option<String>,
}

/// PUT /api/tramites/:id - Advance the lifecycle state
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTramiteRequest>,
) -> ApiResult<Tramite> {
    user.require_back_office()?;

    let estado = EstadoTramite::parse(&payload.estado)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown estado '{}'", payload.estado)))?;

    let pool = DatabaseManager::pool().await?;
    let tramite = TramiteRepository::new(pool)
        .update_estado(id, estado, payload.resultado)
        .await?
        .ok_or_else(|| ApiError::not_found("Tramite not found"))?;

    tracing::info!(id = %id, estado = %estado, updated_by = %user.email, "tramite updated");
    Ok(ApiResponse::success(tramite))
}

/// DELETE /api/tramites/:id
pub async fn delete(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Value> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let deleted = TramiteRepository::new(pool).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Tramite not found"));
    }

    tracing::info!(id = %id, deleted_by = %user.email, "tramite deleted");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
