//! `leadrelay` command-line entry point.
//!
//! Prints the resulting envelope as pretty JSON on stdout and exits with a
//! non-zero status when it reports a failure. Logs go to stderr.

mod args;
mod commands;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadrelay_db::{SupabaseClient, SupabaseConfig};
use leadrelay_engine::{AnalysisEngineClient, EngineConfig};

use crate::args::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadrelay=info,leadrelay_forward=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let envelope = match cli.command {
        Command::CalendlyStatus {
            lead_id,
            event_id,
            scheduled_at,
        } => commands::calendly_status(&database()?, lead_id, event_id, scheduled_at).await?,

        Command::Analyze {
            url,
            company_name,
            industry,
            project_id,
        } => {
            let engine = AnalysisEngineClient::new(&EngineConfig::from_env()?);
            commands::analyze(&engine, url, company_name, industry, project_id).await?
        }

        Command::FindLead { company, limit } => {
            commands::find_lead(&database()?, &company, limit).await?
        }

        Command::Rpc { function, args } => commands::rpc(&database()?, &function, args).await?,

        Command::Forward {
            endpoint,
            method,
            body,
            require,
        } => commands::forward(&endpoint, method, body, &require).await?,
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if !envelope.success {
        std::process::exit(1);
    }

    Ok(())
}

fn database() -> anyhow::Result<SupabaseClient> {
    let config = SupabaseConfig::from_env()?;
    tracing::debug!(url = %config.url, "Database client created");
    Ok(SupabaseClient::new(&config)?)
}
