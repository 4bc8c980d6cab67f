use anyhow::{bail, Context, Result};

pub async fn handle(server: &str) -> Result<()> {
    let url = format!("{}/health", server.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("could not reach {}", url))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.context("health response was not JSON")?;

    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        bail!("server reported {}", status);
    }
    Ok(())
}
