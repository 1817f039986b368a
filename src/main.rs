use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use commands::App;
use gymbro::{
    logging,
    models::KnownMaxes,
    store::{Store, mint_guest_id},
    types::{Config, OutputFmt},
};
use tracing::info;

mod cli;
mod commands;

const DEFAULT_DB: &str = "./gymbro.db";
const DEFAULT_GUEST_DIR: &str = "./guests";

/// Active user id: `--user`, then config, else a freshly minted guest that is
/// written back to config.
fn resolve_user(flag: Option<String>, cfg: &mut Config, config_path: &Path) -> Result<String> {
    if let Some(user) = flag.or_else(|| cfg.get("user").map(str::to_string)) {
        return Ok(user);
    }

    let id = mint_guest_id(Utc::now());
    cfg.map.insert("user".to_string(), id.clone());
    cfg.save(config_path)?;
    info!(user = %id, "created guest user");
    Ok(id)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = commands::config::config_path()?;
    let mut cfg = Config::load(&config_path)?;

    logging::init(cli.verbose, cfg.get("log"))?;

    let fmt = if cli.json { OutputFmt::Json } else { OutputFmt::Text };

    // Config edits must work without touching the store.
    let cmd = match cli.cmd {
        Commands::Config(cmd) => return commands::config::handle(cmd, &config_path, fmt).await,
        cmd => cmd,
    };

    let user = resolve_user(cli.user, &mut cfg, &config_path)?;
    let db_path = cfg.get("db").unwrap_or(DEFAULT_DB);
    let guest_dir = cfg.get("guest_dir").unwrap_or(DEFAULT_GUEST_DIR);
    let store = Store::open(db_path, guest_dir).await?;

    let app = App::new(store, user, fmt);

    match cmd {
        Commands::Profile(cmd) => commands::profile::handle(cmd, &app).await?,
        Commands::Test { exercise, weight, reps } => commands::strength::test(&app, exercise, weight, reps).await?,
        Commands::Maxes { bench, squat, deadlift } => {
            commands::strength::maxes(&app, KnownMaxes { bench, squat, deadlift }).await?
        }
        Commands::Plan(cmd) => commands::plan::handle(cmd, &app).await?,
        Commands::Workout(cmd) => commands::workout::handle(cmd, &app).await?,
        Commands::Status => commands::status::handle(&app).await?,
        Commands::Challenge(cmd) => commands::challenge::handle(cmd, &app).await?,
        Commands::Calendar { year, month } => commands::calendar::handle(&app, year, month).await?,
        Commands::Config(cmd) => commands::config::handle(cmd, &config_path, fmt).await?,
    }

    Ok(())
}
