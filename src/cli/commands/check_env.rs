use anyhow::{bail, Result};

use crate::database::manager::DatabaseManager;

/// Minimum length accepted for a signing secret
const MIN_SECRET_LEN: usize = 32;

/// Validate the local environment the server will start with. Nothing is
/// contacted over the network; this only inspects variables.
pub fn handle() -> Result<()> {
    let mut problems: Vec<String> = Vec::new();

    match std::env::var("DATABASE_URL") {
        Ok(value) => match DatabaseManager::redacted_url(&value) {
            Ok(redacted) => println!("DATABASE_URL: {}", redacted),
            Err(_) => problems.push("DATABASE_URL is set but cannot be parsed".to_string()),
        },
        Err(_) => problems.push("DATABASE_URL is not set".to_string()),
    }

    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= MIN_SECRET_LEN => {
            println!("JWT_SECRET: set ({} chars)", secret.len());
        }
        Ok(secret) => problems.push(format!(
            "JWT_SECRET is too short ({} chars, want at least {})",
            secret.len(),
            MIN_SECRET_LEN
        )),
        Err(_) => problems.push("JWT_SECRET is not set".to_string()),
    }

    match std::env::var("APP_ENV") {
        Ok(value) => println!("APP_ENV: {}", value),
        Err(_) => println!("APP_ENV: not set (defaults to development)"),
    }

    if problems.is_empty() {
        println!("Environment looks ready.");
        Ok(())
    } else {
        for problem in &problems {
            eprintln!("- {}", problem);
        }
        bail!("{} problem(s) found", problems.len())
    }
}
