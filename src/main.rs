//! recform - drive an edit-or-create record dialog from the command line
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use recform::{run_headless, HeadlessOptions};
use recform_app::config::init_config_dir;
use recform_core::{OwnerId, RecordId};

/// recform - edit or create a record through a headless dialog
#[derive(Parser, Debug)]
#[command(name = "recform")]
#[command(about = "Edit or create a record through a headless dialog", long_about = None)]
struct Args {
    /// Record to edit (omit to create a new one)
    #[arg(long, value_name = "ID")]
    id: Option<String>,

    /// Principal that owns newly created records
    #[arg(long, value_name = "OWNER", default_value = "local-user")]
    owner: String,

    /// JSON array of records to preload into the store
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,

    /// Reject every create/update with this message
    #[arg(long, value_name = "MESSAGE")]
    fail_writes: Option<String>,

    /// Artificial latency for every store call, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    latency_ms: u64,

    /// Directory containing .recform/config.toml
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Write a default .recform/config.toml and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_dir = args
        .config_dir
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init_config {
        init_config_dir(&config_dir)?;
        eprintln!(
            "Wrote default config to {}",
            config_dir.join(".recform").join("config.toml").display()
        );
        return Ok(());
    }

    recform_core::logging::init()?;

    run_headless(HeadlessOptions {
        id: args.id.map(RecordId::new),
        owner: OwnerId::new(args.owner),
        seed: args.seed,
        fail_writes: args.fail_writes,
        latency_ms: args.latency_ms,
        config_dir,
    })
    .await?;

    Ok(())
}
