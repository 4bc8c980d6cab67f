mod common;

use anyhow::Result;
use muni_api::auth::Rol;
use reqwest::StatusCode;

#[tokio::test]
async fn protected_route_without_token_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_403() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .header("Authorization", "Bearer not.a.token")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_403() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let claims = muni_api::auth::Claims::new(
        uuid::Uuid::new_v4(),
        "intruso@example.com".to_string(),
        Rol::Admin,
        2,
    );
    let forged = muni_api::auth::sign_token(&claims, "a-completely-different-secret")?;

    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .header("Authorization", format!("Bearer {}", forged))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_401() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .header("Authorization", "Basic dXNlcjpwdw==")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_claims() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(Rol::Empleado, "inspector@municipalidad.gob.ar");

    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "inspector@municipalidad.gob.ar");
    assert_eq!(body["data"]["rol"], "empleado");
    Ok(())
}

#[tokio::test]
async fn resident_token_cannot_reach_back_office() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(Rol::Vecino, "vecino@example.com");

    // Passes the JWT gate but fails the role check, before any database access
    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn staff_token_passes_the_gate() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(Rol::Admin, "admin@municipalidad.gob.ar");

    let res = client
        .get(format!("{}/api/empleados", server.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    // With a provisioned database this is a 200; without one the handler
    // fails past the gate with a 5xx. Either way the gate accepted the token.
    assert!(
        res.status() != StatusCode::UNAUTHORIZED && res.status() != StatusCode::FORBIDDEN,
        "gate rejected a valid staff token: {}",
        res.status()
    );
    Ok(())
}
