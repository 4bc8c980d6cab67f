use axum::Extension;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Rol;
use crate::middleware::auth::CurrentUser;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub id: Uuid,
    pub email: String,
    pub rol: Rol,
}

/// GET /api/auth/whoami - Echo the authenticated claims
pub async fn whoami(Extension(user): Extension<CurrentUser>) -> ApiResult<WhoamiResponse> {
    Ok(ApiResponse::success(WhoamiResponse {
        id: user.id,
        email: user.email,
        rol: user.rol,
    }))
}
