//! CLI administration tool for shortr.
//!
//! Works on the link store directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Encode a row id / decode a name
//! cargo run --bin admin -- codec encode 3844
//! cargo run --bin admin -- codec decode 100
//!
//! # Inspect, create and delete links
//! cargo run --bin admin -- link show aZ3
//! cargo run --bin admin -- link create https://example.com
//! cargo run --bin admin -- link delete aZ3 -y
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`).
//! The `codec` commands need none.

use shortr::config::{Config, mask_connection_string};
use shortr::domain::entities::Link;
use shortr::domain::repositories::LinkRepository;
use shortr::infrastructure::persistence::PgLinkRepository;
use shortr::server::connect_pool;
use shortr::utils::base62;
use shortr::utils::url_validator::validate_target_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortr.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Base62 conversions between row ids and names
    Codec {
        #[command(subcommand)]
        action: CodecAction,
    },

    /// Inspect and manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CodecAction {
    /// Print the name derived from a row id
    Encode { id: i64 },

    /// Print the row id a derived name stands for
    Decode { name: String },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a link with its hit metrics
    Show { name: String },

    /// Create a link with a derived name
    Create { url: String },

    /// Delete a link
    Delete {
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Codec { action } => handle_codec_action(action)?,
        Commands::Link { action } => {
            let pool = connect().await?;
            handle_link_action(action, &pool).await?;
        }
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let config = Config::from_env()?;
    connect_pool(&config)
        .await
        .with_context(|| format!("Could not reach {}", mask_connection_string(&config.database_url)))
}

fn handle_codec_action(action: CodecAction) -> Result<()> {
    match action {
        CodecAction::Encode { id } => {
            let name = base62::encode(id)?;
            println!("{} -> {}", id.to_string().bright_white(), name.bright_green().bold());
        }
        CodecAction::Decode { name } => {
            let id = base62::decode(&name)?;
            println!("{} -> {}", name.bright_white(), id.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::Show { name } => {
            let link = repo
                .find_by_name(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .with_context(|| format!("No link named '{name}'"))?;

            print_link(&link);
        }
        LinkAction::Create { url } => {
            let url = validate_target_url(&url)?;
            let link = repo
                .create_with_derived_name(&url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!();
            print_link(&link);
        }
        LinkAction::Delete { name, yes } => delete_link(&repo, &name, yes).await?,
    }

    Ok(())
}

/// Deletes a link after confirmation (default: No).
///
/// A running server keeps serving its cached copy until the entry is evicted
/// or the server restarts; delete through the HTTP API to avoid that.
async fn delete_link(repo: &PgLinkRepository, name: &str, skip_confirm: bool) -> Result<()> {
    let link = repo
        .find_by_name(name)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No link named '{name}'"))?;

    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(name)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!(
        "{}",
        "⚠️  Running servers may serve a cached copy until it is evicted".yellow()
    );

    Ok(())
}

fn print_link(link: &Link) {
    let last_hit = link
        .last_hit_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  ID:       {}", link.id.to_string().bright_black());
    println!("  Name:     {}", link.name.cyan());
    println!("  URL:      {}", link.url.bright_white());
    println!("  Hits:     {}", link.hits.to_string().bright_green().bold());
    println!("  Last hit: {}", last_hit.bright_black());
    println!(
        "  Created:  {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Connected, but the links table is missing (run the server once to migrate)")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}", links.to_string().bright_green().bold());
        }
    }

    Ok(())
}
