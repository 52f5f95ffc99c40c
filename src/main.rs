use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use api::{ApiError, SoshaClient};
use clap::{Parser, Subcommand, ValueEnum};
use config::{Config, ConfigError};
use futures::future::join_all;
use posts::{group_posts, PostGroup};
use render::{GroupListing, ToolkitLine};
use serde::Serialize;
use thiserror::Error;
use toolkits::{Toolkit, ToolkitStatus};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod posts;
mod render;
mod toolkits;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to configuration file.
    #[arg(long, default_value = ".toolkitview.yml")]
    config: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List toolkits of the organization.
    Toolkits,
    /// Show posts of a toolkit, grouped.
    Posts {
        /// Toolkit ID.
        toolkit_id: String,
    },
    /// Show grouped posts of every published toolkit.
    Overview {
        /// Include draft toolkits too.
        #[arg(long)]
        drafts: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to fetch from API: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolkitPage<'a> {
    toolkit_id: &'a str,
    post_groups: Vec<PostGroup>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OverviewEntry {
    toolkit: Toolkit,
    post_groups: Vec<PostGroup>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Args {
        config,
        format,
        command,
    } = Args::parse();

    match run(&config, format, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Path, format: Format, command: Command) -> Result<(), CommandError> {
    let cfg = Config::load(config)?;
    let client = SoshaClient::new(&cfg)?;

    match command {
        Command::Toolkits => toolkits(&client, format).await,
        Command::Posts { toolkit_id } => posts(&client, &toolkit_id, format).await,
        Command::Overview { drafts } => overview(&client, drafts, format).await,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CommandError> {
    serde_json::to_string_pretty(value).map_err(CommandError::Output)
}

async fn toolkits(client: &SoshaClient, format: Format) -> Result<(), CommandError> {
    let toolkits = client.get_toolkits().send().await?;
    info!(count = toolkits.len(), "fetched toolkits");

    match format {
        Format::Json => println!("{}", to_json(&toolkits)?),
        Format::Text => {
            for toolkit in &toolkits {
                println!("{}", ToolkitLine(toolkit));
            }
        }
    }

    Ok(())
}

async fn build_page<'a>(
    client: &SoshaClient,
    toolkit_id: &'a str,
) -> Result<ToolkitPage<'a>, ApiError> {
    let post_groups = group_posts(client.get_posts(toolkit_id).send().await?);
    info!(toolkit = toolkit_id, groups = post_groups.len(), "grouped posts");

    Ok(ToolkitPage {
        toolkit_id,
        post_groups,
    })
}

async fn posts(client: &SoshaClient, toolkit_id: &str, format: Format) -> Result<(), CommandError> {
    let page = build_page(client, toolkit_id).await?;

    match format {
        Format::Json => println!("{}", to_json(&page)?),
        Format::Text => {
            for group in &page.post_groups {
                print!("{}", GroupListing(group));
            }
        }
    }

    Ok(())
}

/// Grouped posts of every published toolkit, drafts too if asked.
/// Toolkits whose posts fail to load are logged and left out.
async fn build_overview(client: &SoshaClient, drafts: bool) -> Result<Vec<OverviewEntry>, ApiError> {
    let toolkits: Vec<Toolkit> = client
        .get_toolkits()
        .send()
        .await?
        .into_iter()
        .filter(|t| drafts || t.status == ToolkitStatus::Published)
        .collect();

    let results = {
        let jobs = toolkits.iter().map(|t| client.get_posts(&t.id).send());
        join_all(jobs).await
    };

    let entries = results
        .into_iter()
        .zip(toolkits)
        .filter_map(|(res, toolkit)| match res {
            Ok(posts) => Some(OverviewEntry {
                toolkit,
                post_groups: group_posts(posts),
            }),
            Err(e) => {
                warn!(toolkit = %toolkit.id, "Failed to fetch posts: {e}");
                None
            }
        })
        .collect();

    Ok(entries)
}

async fn overview(client: &SoshaClient, drafts: bool, format: Format) -> Result<(), CommandError> {
    let entries = build_overview(client, drafts).await?;

    match format {
        Format::Json => println!("{}", to_json(&entries)?),
        Format::Text => {
            for entry in &entries {
                println!("{}", ToolkitLine(&entry.toolkit));
                for group in &entry.post_groups {
                    print!("{}", GroupListing(group));
                }
                println!();
            }
        }
    }

    Ok(())
}
