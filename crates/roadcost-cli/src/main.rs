use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roadcost_infrastructure::{ConfigService, apply_target_override};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "roadcost")]
#[command(about = "Road safety cost analysis - upload survey documents and read their cost summaries", long_about = None)]
struct Cli {
    /// Base URL of the analysis service (overrides config and ROADCOST_API_TARGET)
    #[arg(long, global = true)]
    target: Option<String>,

    /// Config file to read instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and show its lifecycle and summary
    Upload {
        /// File to upload (.pdf, .docx, .txt, .png, .jpg, .jpeg)
        file: PathBuf,
        /// Poll the document status until processing finishes
        #[arg(long)]
        wait: bool,
    },
    /// Show the analysis summary of a document
    Summary { id: String },
    /// Show the processing status of a document
    Status { id: String },
    /// List uploaded documents
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Ask the service to re-run the analysis of a document
    Analyze { id: String },
    /// Download the generated report of a document
    Report {
        id: String,
        /// Destination file (defaults to report_<id>.pdf)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the processing pipeline stages
    Stages,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roadcost=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = service.get_config().context("Failed to load configuration")?;
    let config = apply_target_override(config, cli.target);

    match cli.command {
        Commands::Upload { file, wait } => commands::upload::run(config, &file, wait).await?,
        Commands::Summary { id } => commands::summary::run(config, &id).await?,
        Commands::Status { id } => commands::documents::status(config, &id).await?,
        Commands::List { skip, limit } => commands::documents::list(config, skip, limit).await?,
        Commands::Analyze { id } => commands::documents::analyze(config, &id).await?,
        Commands::Report { id, output } => {
            commands::documents::report(config, &id, output).await?
        }
        Commands::Stages => commands::stages::run(),
    }

    Ok(())
}
