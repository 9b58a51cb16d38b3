use std::sync::Arc;

use admin_core::{selection, AdminWorkbench};
use anyhow::{Context, Result};
use catalog_client::{HttpRemoteCatalog, RemoteCatalog};
use clap::{Parser, Subcommand};
use shared::domain::{Country, ExpertId};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
#[command(about = "Admin console for the visa catalog gateway")]
struct Args {
    /// Overrides the configured API endpoint.
    #[arg(long)]
    api_endpoint: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the country catalog.
    Countries {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List visa types for one country.
    Visas {
        #[arg(long)]
        country: String,
    },
    /// List specialists, optionally filtered server-side.
    Experts {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        visa_type: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show one specialist by id.
    Expert {
        #[arg(long)]
        id: String,
    },
    /// Delete a visa type; `--yes` carries the destructive-intent
    /// confirmation.
    DeleteVisa {
        #[arg(long)]
        country: String,
        #[arg(long)]
        visa_type: String,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(endpoint) = args.api_endpoint {
        settings.api_endpoint = endpoint;
    }
    info!(endpoint = %settings.api_endpoint, "console starting");

    let catalog = HttpRemoteCatalog::new(&settings.api_endpoint)
        .with_context(|| format!("invalid api endpoint {}", settings.api_endpoint))?;
    let workbench = AdminWorkbench::new(Arc::new(catalog) as Arc<dyn RemoteCatalog>);

    match args.command {
        Command::Countries { search } => {
            workbench.load_countries().await;
            let countries = workbench.countries().await;
            for country in selection::filtered_countries(&countries, &search) {
                println!("{country}");
            }
        }
        Command::Visas { country } => {
            workbench
                .select_country(Country::from(country.as_str()))
                .await;
            for visa in workbench.visa_types().await {
                println!(
                    "{}\t{}\t{}",
                    visa.visa_type, visa.duration, visa.description
                );
            }
        }
        Command::Experts {
            country,
            visa_type,
            search,
        } => {
            workbench
                .set_expert_filters(country.map(|value| Country::from(value.as_str())), visa_type)
                .await;
            let specialists = workbench.specialists().await;
            for specialist in selection::filtered_specialists(&specialists, &search) {
                println!(
                    "{}\t{}\t{} ({} reviews)\t{}",
                    specialist.name,
                    specialist.title,
                    specialist.rating,
                    specialist.review_count,
                    specialist.availability
                );
            }
        }
        Command::Expert { id } => {
            if let Some(specialist) = workbench
                .fetch_specialist(&ExpertId::from(id.as_str()))
                .await
            {
                println!("{}", serde_json::to_string_pretty(&specialist)?);
            }
        }
        Command::DeleteVisa {
            country,
            visa_type,
            yes,
        } => {
            workbench
                .select_country(Country::from(country.as_str()))
                .await;
            if !workbench.select_visa(&visa_type).await {
                println!("visa type {visa_type} not found for {country}");
                return Ok(());
            }
            if !yes {
                println!("refusing to delete {visa_type} without --yes");
                return Ok(());
            }
            workbench.delete_visa(true).await;
        }
    }

    if let Some(alert) = workbench.active_alert().await {
        println!("[{:?}] {}", alert.severity, alert.message);
    }

    Ok(())
}
