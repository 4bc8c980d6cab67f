//! Shared input validation for the public auth surface.

/// Basic email shape check for registration and login inputs
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Lowercased, trimmed form used for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email_format("mesa.entradas@municipalidad.gob.ar").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_email_format("").is_err());
        assert!(validate_email_format("sin-arroba").is_err());
        assert!(validate_email_format("@dominio.com").is_err());
        assert!(validate_email_format("usuario@").is_err());
        assert!(validate_email_format("usuario@dominio").is_err());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  Mesa@Municipalidad.Gob.Ar "), "mesa@municipalidad.gob.ar");
    }
}
