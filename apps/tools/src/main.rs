use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, PlatformApi, Settings, VercelClient};
use serde_json::json;
use shared::{
    domain::{Credentials, LogDrainType},
    protocol::DrainParams,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    /// Team to act on; omit for a personal account.
    #[arg(long)]
    team_id: Option<String>,
    /// Prefer the environment variable; flags end up in shell history.
    #[arg(long, env = "VERCEL_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Print results as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange an integration setup code for an access token.
    ExchangeCode { code: String },
    Projects,
    Drains,
    CreateDrain {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long = "type", default_value_t = LogDrainType::Ndjson)]
        drain_type: LogDrainType,
        #[arg(long)]
        project_id: Option<String>,
        /// Defaults to a generated secret.
        #[arg(long)]
        secret: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = apply_overrides(load_settings(cli.config.as_deref()), &cli);
    let client = VercelClient::from_settings(&settings).context("failed to build API client")?;

    match cli.command {
        Command::ExchangeCode { ref code } => {
            let grant = client.exchange_code(code).await?;
            if cli.json {
                let body = json!({
                    "access_token": grant.access_token.expose(),
                    "token_type": grant.token_type,
                    "installation_id": grant.installation_id,
                    "user_id": grant.user_id,
                    "team_id": grant.team_id,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("access_token={}", grant.access_token.expose());
                println!("installation_id={}", grant.installation_id);
                if let Some(team_id) = &grant.team_id {
                    println!("team_id={team_id}");
                }
            }
        }
        Command::Projects => {
            let projects = client.list_projects(&credentials(&settings)?).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else {
                for project in &projects {
                    println!("{}\t{}", project.id, project.name);
                }
            }
        }
        Command::Drains => {
            let drains = client.list_log_drains(&credentials(&settings)?).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&drains)?);
            } else {
                for drain in &drains {
                    println!(
                        "{}\t{}\t{}\t{}",
                        drain.id, drain.name, drain.drain_type, drain.url
                    );
                }
            }
        }
        Command::CreateDrain {
            ref name,
            ref url,
            drain_type,
            ref project_id,
            ref secret,
        } => {
            let mut form = DrainParams::new();
            form.name = name.clone();
            form.url = url.clone();
            form.drain_type = drain_type;
            form.project_id = project_id.clone().unwrap_or_default();
            if let Some(secret) = secret {
                form.secret = secret.clone();
            }
            let request = form.validate()?;
            let drain = client
                .create_log_drain(&credentials(&settings)?, &request)
                .await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&drain)?);
            } else {
                println!("created drain_id={}", drain.id);
                if let Some(secret) = &request.secret {
                    println!("secret={secret}");
                }
            }
        }
    }

    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(api_url) = &cli.api_url {
        settings.api_url = api_url.clone();
    }
    if let Some(team_id) = &cli.team_id {
        settings.team_id = Some(team_id.clone());
    }
    if let Some(token) = &cli.token {
        settings.access_token = Some(token.clone());
    }
    settings
}

fn credentials(settings: &Settings) -> Result<Credentials> {
    settings
        .credentials()
        .context("no access token; pass --token or set VERCEL_ACCESS_TOKEN")
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
