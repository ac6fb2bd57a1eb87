//! User geo statistics CLI.
//!
//! Usage:
//!     user_geostats stats --data users.csv
//!     user_geostats generate --count 1000 --seed 42 --out users.csv
//!     user_geostats users --data users.csv
//!     user_geostats run --config service.yaml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_geostats::service::{ApiResponse, ServiceConfig};
use user_geostats::stats::distance_statistics;
use user_geostats::user::{
    hash_password, load_records, os_random_seed, save_records, seeded_rng, RandomUsers, UserStore,
};

/// Password carried by synthetic users; datasets only ever store its hash.
const GENERATED_PASSWORD: &str = "password";

#[derive(Parser)]
#[command(name = "user_geostats")]
#[command(version)]
#[command(about = "User records and pairwise geo-distance statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute distance statistics over a dataset
    Stats {
        /// User dataset (CSV)
        #[arg(long)]
        data: PathBuf,
    },

    /// Write a synthetic user dataset
    Generate {
        /// Number of users
        #[arg(short, long, default_value = "1000")]
        count: usize,

        /// Rng seed; drawn from the OS when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (CSV)
        #[arg(long)]
        out: PathBuf,
    },

    /// List the users of a dataset
    Users {
        /// User dataset (CSV)
        #[arg(long)]
        data: PathBuf,
    },

    /// Generate the configured dataset if it is absent, then compute
    /// statistics over it
    Run {
        /// Config file (YAML or RON)
        #[arg(long)]
        config: PathBuf,
    },
}

fn load_store(data: &Path) -> Result<UserStore> {
    let records = load_records(data).with_context(|| format!("loading {}", data.display()))?;
    let mut store = UserStore::new();
    for record in records {
        store
            .insert(record)
            .with_context(|| format!("storing records from {}", data.display()))?;
    }

    Ok(store)
}

fn cmd_stats(data: &Path) -> Result<()> {
    let store = load_store(data)?;
    let points = store.coordinates();
    info!(users = store.len(), points = points.len(), "dataset loaded");

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("computing distance statistics");
    spinner.enable_steady_tick(100);
    let result = distance_statistics(&points);
    spinner.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(result))?);
    Ok(())
}

fn cmd_generate(count: usize, seed: Option<u64>, out: &Path) -> Result<()> {
    let seed = seed.map(u128::from).unwrap_or_else(os_random_seed);
    let hash = hash_password(GENERATED_PASSWORD).context("hashing the shared password")?;
    let mut rng = seeded_rng(seed);

    let bar = ProgressBar::new(count as u64);
    let users: Vec<_> = RandomUsers::new(count, &hash, &mut rng)
        .map(|user| {
            bar.inc(1);
            user
        })
        .collect();
    bar.finish_and_clear();

    save_records(out, &users).with_context(|| format!("writing {}", out.display()))?;
    info!(count = users.len(), file = %out.display(), "dataset generated");
    Ok(())
}

fn cmd_users(data: &Path) -> Result<()> {
    let store = load_store(data)?;
    let users: Vec<_> = store.iter().cloned().collect();

    println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(users))?);
    Ok(())
}

fn cmd_run(config: &Path) -> Result<()> {
    let config =
        ServiceConfig::from_file(config).with_context(|| format!("reading {}", config.display()))?;
    let dataset = PathBuf::from(&config.dataset);

    if !dataset.exists() {
        if let Some(generator) = &config.generator {
            let cfg = generator.cfg();
            info!(count = cfg.count, seed = cfg.seed, "generating configured dataset");
            cmd_generate(cfg.count, Some(cfg.seed), &dataset)?;
        }
    }

    cmd_stats(&dataset)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stats { data } => cmd_stats(&data),
        Commands::Generate { count, seed, out } => cmd_generate(count, seed, &out),
        Commands::Users { data } => cmd_users(&data),
        Commands::Run { config } => cmd_run(&config),
    }
}
