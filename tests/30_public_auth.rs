mod common;

use anyhow::Result;
use muni_api::auth::Rol;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_requires_credentials() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": "", "password": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn login_without_body_is_a_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .send()
        .await?;

    assert!(res.status().is_client_error(), "unexpected status: {}", res.status());
    Ok(())
}

#[tokio::test]
async fn login_attempt_reaches_the_store() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/login", server.base_url))
        .json(&json!({ "email": "nadie@example.com", "password": "whatever" }))
        .send()
        .await?;

    // 401 with a provisioned database (unknown account), 5xx without one
    assert!(
        res.status() == StatusCode::UNAUTHORIZED || res.status().is_server_error(),
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], true);
    Ok(())
}

#[tokio::test]
async fn verificar_token_rejects_garbage() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/verificar-token", server.base_url))
        .json(&json!({ "token": "junk.junk.junk" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn verificar_token_accepts_a_valid_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let token = common::issue_token(Rol::Empleado, "mesa.entradas@municipalidad.gob.ar");

    let res = client
        .post(format!("{}/auth/verificar-token", server.base_url))
        .json(&json!({ "token": token }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["valido"], true);
    assert_eq!(body["data"]["usuario"]["email"], "mesa.entradas@municipalidad.gob.ar");
    Ok(())
}

#[tokio::test]
async fn bootstrap_status_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/admin/bootstrap", server.base_url))
        .send()
        .await?;

    // 200 with a provisioned database, 5xx without one
    assert!(
        res.status() == StatusCode::OK || res.status().is_server_error(),
        "unexpected status: {}",
        res.status()
    );

    let status = res.status();
    let body = res.json::<serde_json::Value>().await?;
    if status == StatusCode::OK {
        assert!(body["data"]["sistema_virgen"].is_boolean());
    }
    Ok(())
}

#[tokio::test]
async fn bootstrap_rejects_weak_passwords() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Strength validation runs before any database access
    let res = client
        .post(format!("{}/admin/bootstrap", server.base_url))
        .json(&json!({ "email": "admin@municipalidad.gob.ar", "password": "debil" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"].get("password").is_some());
    Ok(())
}
