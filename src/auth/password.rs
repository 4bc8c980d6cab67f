//! Password hashing and strength rules for employee/resident credentials.

use bcrypt::BcryptError;

/// Characters accepted as the "special character" requirement.
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hash)
}

/// Validate a candidate password against the institutional strength rules.
/// Returns every violated rule so clients can show the full list at once.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        problems.push(format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one digit".to_string());
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        problems.push("Password must contain at least one special character".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_strong_password() {
        assert!(validate_password_strength("Tr4mite#2025").is_ok());
    }

    #[test]
    fn reports_every_violated_rule() {
        let problems = validate_password_strength("abc").unwrap_err();
        // too short, no uppercase, no digit, no special
        assert_eq!(problems.len(), 4);
    }

    #[test]
    fn requires_special_character() {
        let problems = validate_password_strength("Abcdefg1").unwrap_err();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("special character"));
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        // Minimum cost keeps the test fast
        let hash = hash_password("Vecino$123", 4).unwrap();
        assert!(verify_password("Vecino$123", &hash).unwrap());
        assert!(!verify_password("Vecino$124", &hash).unwrap());
    }
}
