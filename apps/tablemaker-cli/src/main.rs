use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{ConfigOverrides, TablemakerConfig};
use error::CliResult;

const DEFAULT_LOG_FILTER: &str = "tablemaker=info";
const VERBOSE_LOG_FILTER: &str = "tablemaker=debug";

#[derive(Parser)]
#[command(name = "tablemaker")]
#[command(about = "tablemaker - Compile CSV tables into typed Rust records and bind their data")]
#[command(version)]
struct Cli {
    /// Config file (default: tablemaker.yaml if present)
    #[arg(long, global = true, env = "TABLEMAKER_CONFIG")]
    config: Option<PathBuf>,

    /// Folder searched for table CSVs
    #[arg(long, global = true, env = "TABLEMAKER_CSV_FOLDER")]
    csv_folder: Option<String>,

    /// Folder that receives persisted table objects
    #[arg(long, global = true, env = "TABLEMAKER_OBJECT_FOLDER")]
    object_folder: Option<String>,

    /// Folder that receives generated Rust source
    #[arg(long, global = true, env = "TABLEMAKER_SOURCE_ROOT")]
    source_root: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust modules, manifests and the registry from every CSV
    CompileSchemas,

    /// Bind every CSV against its compiled schema and persist the result
    BindData {
        /// Fail a table at its first invalid row instead of skipping the row
        #[arg(long)]
        fail_fast: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fail_fast = matches!(cli.command, Commands::BindData { fail_fast: true });
    let config = TablemakerConfig::load(cli.config.as_deref())?.apply(ConfigOverrides {
        csv_folder: cli.csv_folder,
        object_folder: cli.object_folder,
        source_root: cli.source_root,
        fail_fast,
    });
    tracing::debug!(?config, "Resolved configuration");

    let failures = match cli.command {
        Commands::CompileSchemas => commands::compile_schemas::execute(&config)?,
        Commands::BindData { .. } => commands::bind_data::execute(&config)?,
    };

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
