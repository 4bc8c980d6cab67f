use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{verify_token, Claims, Rol};
use crate::config;
use crate::error::ApiError;

/// Authenticated caller context extracted from JWT claims
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub rol: Rol,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            rol: claims.rol,
        }
    }
}

impl CurrentUser {
    /// 403 unless the caller holds exactly this role
    pub fn require_rol(&self, rol: Rol) -> Result<(), ApiError> {
        if self.rol == rol {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!("Operation restricted to the {} role", rol)))
        }
    }

    /// 403 unless the caller is back-office staff (admin or empleado).
    /// Resident tokens pass the JWT gate but may not reach these routes.
    pub fn require_back_office(&self) -> Result<(), ApiError> {
        if self.rol.is_back_office() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Operation restricted to municipal staff"))
        }
    }
}

/// JWT authentication middleware for everything under /api.
///
/// Missing or malformed Authorization header is a 401; a token that fails
/// signature, expiry or issuer checks is a 403 (mirroring the split the
/// institutional clients already rely on). On success the caller context is
/// injected into request extensions and an access-trace event is emitted.
pub async fn jwt_auth(headers: HeaderMap, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let secret = &config::config().security.jwt_secret;
    let claims = verify_token(&token, secret)?;

    let user = CurrentUser::from(claims);

    if config::config().security.enable_audit_logging {
        tracing::info!(
            target: "acceso",
            usuario = %user.email,
            rol = %user.rol,
            method = %request.method(),
            path = %request.uri().path(),
            "authorized access"
        );
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with("Bearer ");
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn role_gating() {
        let admin = CurrentUser {
            id: Uuid::new_v4(),
            email: "admin@municipalidad.gob.ar".to_string(),
            rol: Rol::Admin,
        };
        let vecino = CurrentUser {
            id: Uuid::new_v4(),
            email: "vecino@example.com".to_string(),
            rol: Rol::Vecino,
        };

        assert!(admin.require_rol(Rol::Admin).is_ok());
        assert!(admin.require_back_office().is_ok());
        assert!(vecino.require_back_office().is_err());
        assert_eq!(vecino.require_rol(Rol::Admin).unwrap_err().status_code(), 403);
    }
}
