use axum::{extract::Path, Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Denuncia, EstadoDenuncia};
use crate::database::repositories::denuncias::NewDenuncia;
use crate::database::repositories::DenunciaRepository;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/denuncias - Newest complaints first
pub async fn list(Extension(user): Extension<CurrentUser>) -> ApiResult<Vec<Denuncia>> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let denuncias = DenunciaRepository::new(pool).list().await?;
    Ok(ApiResponse::success(denuncias))
}

/// GET /api/denuncias/:id
pub async fn get(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Denuncia> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let denuncia = DenunciaRepository::new(pool)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Denuncia not found"))?;
    Ok(ApiResponse::success(denuncia))
}

#[derive(Debug, Deserialize)]
pub struct CreateDenunciaRequest {
    pub fecha: NaiveDate,
    pub tipo: String,
    pub descripcion: String,
    pub denunciante: Option<String>,
    pub canal: Option<String>,
    pub terreno_id: Option<Uuid>,
    pub negocio_id: Option<Uuid>,
}

/// POST /api/denuncias
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateDenunciaRequest>,
) -> ApiResult<Denuncia> {
    user.require_back_office()?;

    if payload.tipo.trim().is_empty() || payload.descripcion.trim().is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let pool = DatabaseManager::pool().await?;
    let denuncia = DenunciaRepository::new(pool)
        .insert(NewDenuncia {
            fecha: payload.fecha,
            tipo: payload.tipo.trim().to_string(),
            descripcion: payload.descripcion.trim().to_string(),
            denunciante: payload.denunciante,
            canal: payload.canal,
            terreno_id: payload.terreno_id,
            negocio_id: payload.negocio_id,
        })
        .await?;

    tracing::info!(id = %denuncia.id, tipo = %denuncia.tipo, created_by = %user.email, "denuncia created");
    Ok(ApiResponse::created(denuncia))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDenunciaRequest {
    pub estado: String,
}

/// PUT /api/denuncias/:id - Update the review state
pub async fn update(
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDenunciaRequest>,
) -> ApiResult<Denuncia> {
    user.require_back_office()?;

    let estado = EstadoDenuncia::parse(&payload.estado)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown estado '{}'", payload.estado)))?;

    let pool = DatabaseManager::pool().await?;
    let denuncia = DenunciaRepository::new(pool)
        .update_estado(id, estado)
        .await?
        .ok_or_else(|| ApiError::not_found("Denuncia not found"))?;

    tracing::info!(id = %id, estado = %estado, updated_by = %user.email, "denuncia updated");
    Ok(ApiResponse::success(denuncia))
}

/// DELETE /api/denuncias/:id
pub async fn delete(Extension(user): Extension<CurrentUser>, Path(id): Path<Uuid>) -> ApiResult<Value> {
    user.require_back_office()?;

    let pool = DatabaseManager::pool().await?;
    let deleted = DenunciaRepository::new(pool).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Denuncia not found"));
    }

    tracing::info!(id = %id, deleted_by = %user.email, "denuncia deleted");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
