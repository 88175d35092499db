mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use entity::Choice;
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, connect};
use platform_obs::{init_tracing, shutdown_tracing};
use products_hr::{catalog, drafts, employees, news, seed};
use tracing::info;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "hr-server", version, about = "HR records maintenance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Fill the catalog and a small demo organisation.
    Seed,
    /// Insert the position and specialization rows only.
    Catalog,
    /// Import news articles from a JSON feed file.
    #[command(name = "news:import")]
    NewsImport {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Print employees with short names and labels.
    Employees,
    /// Print drafts waiting for a decision.
    Drafts,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Roll back the most recent migration.
    Down,
    /// Roll back everything.
    Reset,
    /// List applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_tracing(config.obs.clone())?;
    let pool = connect(&config.database).await?;
    let outcome = run(cli.command, &pool).await;
    shutdown_tracing();
    outcome
}

async fn run(command: Command, pool: &DbPool) -> Result<()> {
    match command {
        Command::Migrate(action) => migrate(action, pool).await,
        Command::Seed => {
            ensure_migrations(pool).await?;
            match seed::seed_demo(pool).await? {
                Some(seeded) => info!(employees = seeded.employees.len(), "seed complete"),
                None => info!("seed skipped; demo data already present"),
            }
            Ok(())
        }
        Command::Catalog => {
            ensure_migrations(pool).await?;
            catalog::ensure_catalog(pool).await?;
            info!("catalog up to date");
            Ok(())
        }
        Command::NewsImport { file } => {
            ensure_migrations(pool).await?;
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let articles = news::parse_feed(&raw)?;
            let summary = news::import_articles(pool, articles).await?;
            println!("{}", serde_json::to_string(&summary)?);
            Ok(())
        }
        Command::Employees => {
            ensure_migrations(pool).await?;
            for row in employees::list_employee_summaries(pool).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.short_name,
                    row.position.unwrap_or("-"),
                    row.city,
                    row.telegram_nick
                );
            }
            Ok(())
        }
        Command::Drafts => {
            ensure_migrations(pool).await?;
            for draft in drafts::pending_drafts(pool).await? {
                let employee = employees::find_employee(pool, draft.employee_id).await?;
                println!(
                    "{}\t{}\t{}\t{}",
                    draft.id,
                    draft.title_for(&employee),
                    draft.status.label(),
                    draft.updated_at.to_rfc3339()
                );
            }
            Ok(())
        }
    }
}

async fn migrate(action: MigrateCommand, pool: &DbPool) -> Result<()> {
    match action {
        MigrateCommand::Up => {
            Migrator::up(pool, None).await?;
            info!("database migrations applied");
        }
        MigrateCommand::Down => {
            Migrator::down(pool, Some(1)).await?;
            info!("most recent migration rolled back");
        }
        MigrateCommand::Reset => {
            Migrator::reset(pool).await?;
            info!("all migrations rolled back");
        }
        MigrateCommand::Status => {
            for applied in Migrator::get_applied_migrations(pool).await? {
                println!("applied\t{}", applied.name());
            }
            for pending in Migrator::get_pending_migrations(pool).await? {
                println!("pending\t{}", pending.name());
            }
        }
    }
    Ok(())
}

async fn ensure_migrations(pool: &DbPool) -> Result<()> {
    let pending = Migrator::get_pending_migrations(pool).await?;
    if !pending.is_empty() {
        anyhow::bail!(
            "{} pending migration(s); run `hr-server migrate up` first",
            pending.len()
        );
    }
    Ok(())
}
