use std::path::{Path, PathBuf};

use crate::cli::ConfigCmd;
use anyhow::{Context, Result};
use colored::Colorize;
use gymbro::types::{Config, OutputFmt, emit};

/// Keys gymbro itself reads. Others are kept but ignored.
pub const KNOWN_KEYS: [&str; 4] = ["user", "db", "guest_dir", "log"];

pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("gymbro").join("config"))
        .context("Could not determine config directory")
}

pub async fn handle(cmd: ConfigCmd, config_path: &Path, fmt: OutputFmt) -> Result<()> {
    let mut cfg = Config::load(config_path)?;

    match cmd {
        ConfigCmd::List => {
            emit(fmt, &cfg.map, || {
                if cfg.map.is_empty() {
                    println!("{}", "(no config set)".dimmed());
                } else {
                    println!("{}", "Config:".cyan().bold());
                    for (k, v) in &cfg.map {
                        println!("  {} = {}", k.green(), v);
                    }
                }
            });
        }

        ConfigCmd::Get { key } => match cfg.get(&key) {
            Some(val) => println!("{}", val),
            None => println!("{} key `{}` not found", "warning:".yellow().bold(), key),
        },

        ConfigCmd::Set { key, val } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                println!(
                    "{} `{}` is not a key gymbro reads ({})",
                    "warning:".yellow().bold(),
                    key,
                    KNOWN_KEYS.join(", ")
                );
            }
            cfg.map.insert(key.clone(), val.clone());
            cfg.save(config_path)?;
            println!("{} set `{}` = `{}`", "info:".blue().bold(), key.green(), val);
        }

        ConfigCmd::Unset { key } => {
            if cfg.map.remove(&key).is_some() {
                cfg.save(config_path)?;
                println!("{} removed `{}`", "info:".blue().bold(), key.green());
            } else {
                println!("{} key `{}` not found", "warning:".yellow().bold(), key);
            }
        }
    }

    Ok(())
}
