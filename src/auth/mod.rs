use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod password;

/// Issuer stamped into every token and required on verification.
pub const ISSUER: &str = "muni-api";

/// Account roles carried in JWT claims. Rows store the role as plain text;
/// this enum is the validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    Empleado,
    Vecino,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Empleado => "empleado",
            Rol::Vecino => "vecino",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Rol::Admin),
            "empleado" => Some(Rol::Empleado),
            "vecino" => Some(Rol::Vecino),
            _ => None,
        }
    }

    /// Roles that may operate the back-office (everything under /api except whoami)
    pub fn is_back_office(&self) -> bool {
        matches!(self, Rol::Admin | Rol::Empleado)
    }
}

impl std::fmt::Display for Rol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub rol: Rol,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    pub fn new(sub: Uuid, email: String, rol: Rol, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub,
            email,
            rol,
            exp,
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Encode(String),

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Sign claims into a compact HS256 token.
pub fn sign_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| TokenError::Encode(e.to_string()))
}

/// Verify signature, expiry and issuer, returning the decoded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims() -> Claims {
        Claims::new(Uuid::new_v4(), "inspector@municipalidad.gob.ar".to_string(), Rol::Empleado, 2)
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let original = claims();
        let token = sign_token(&original, SECRET).unwrap();
        let decoded = verify_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, original.sub);
        assert_eq!(decoded.email, original.email);
        assert_eq!(decoded.rol, Rol::Empleado);
        assert_eq!(decoded.iss, ISSUER);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign_token(&claims(), SECRET).unwrap();
        assert!(verify_token(&token, "another-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // Expired well past the default 60s leeway
        let mut expired = claims();
        expired.iat = (Utc::now() - Duration::hours(4)).timestamp();
        expired.exp = (Utc::now() - Duration::hours(2)).timestamp();

        let token = sign_token(&expired, SECRET).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_foreign_issuer() {
        let mut foreign = claims();
        foreign.iss = "some-other-service".to_string();

        let token = sign_token(&foreign, SECRET).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(sign_token(&claims(), ""), Err(TokenError::MissingSecret)));
        assert!(matches!(verify_token("x.y.z", ""), Err(TokenError::MissingSecret)));
    }

    #[test]
    fn rol_parse_and_display() {
        assert_eq!(Rol::parse("admin"), Some(Rol::Admin));
        assert_eq!(Rol::parse("intendente"), None);
        assert_eq!(Rol::Vecino.to_string(), "vecino");
        assert!(Rol::Admin.is_back_office());
        assert!(!Rol::Vecino.is_back_office());
    }
}
