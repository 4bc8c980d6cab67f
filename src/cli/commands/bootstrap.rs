use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde_json::json;

#[derive(Subcommand)]
pub enum BootstrapCommands {
    #[command(about = "Check whether the system still accepts its first administrator")]
    Status,

    #[command(about = "Create the first administrator account")]
    Create {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },
}

pub async fn handle(cmd: BootstrapCommands, server: &str) -> Result<()> {
    let base = server.trim_end_matches('/');
    let client = reqwest::Client::new();

    match cmd {
        BootstrapCommands::Status => {
            let url = format!("{}/admin/bootstrap", base);
            let response = client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("could not reach {}", url))?;

            let status = response.status();
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);

            if !status.is_success() {
                bail!("server reported {}", status);
            }
            Ok(())
        }
        BootstrapCommands::Create { email, password } => {
            let url = format!("{}/admin/bootstrap", base);
            let response = client
                .post(&url)
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await
                .with_context(|| format!("could not reach {}", url))?;

            let status = response.status();
            let body: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);

            if !status.is_success() {
                bail!("bootstrap failed with {}", status);
            }
            Ok(())
        }
    }
}
