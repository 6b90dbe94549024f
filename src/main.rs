use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use newsfeed_mcp::http::ReqwestFetcher;
use newsfeed_mcp::verify::{self, DEFAULT_CONCURRENCY};
use newsfeed_mcp::{mcp, Catalog, Config, NewsService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

const DEFAULT_CONFIG_FILE: &str = "newsfeed-mcp.toml";

#[derive(Parser, Debug)]
#[command(
    name = "newsfeed-mcp",
    version,
    about = "MCP server for RSS feeds, curated news sources and article text"
)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP HTTP server (default)
    Serve {
        /// Listen address, overrides `bind` from the config file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Fetch every source and split the list into working and failing ones
    Verify {
        /// JSON source list to check (default: the loaded catalog)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Where to write the working sources
        #[arg(long, value_name = "FILE", default_value = "VERIFIED_SOURCES.json")]
        verified_out: PathBuf,

        /// Where to write the failing sources with their errors
        #[arg(long, value_name = "FILE", default_value = "FAILED_SOURCES.json")]
        failed_out: PathBuf,

        /// Sources checked at once
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Verify {
            input,
            verified_out,
            failed_out,
            concurrency,
        } => {
            run_verify(
                &config,
                input.as_deref(),
                &verified_out,
                &failed_out,
                concurrency,
            )
            .await
        }
    }
}

async fn serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let catalog = Arc::new(Catalog::load(config.sources_file.as_deref()));
    let config = Arc::new(config);
    let fetcher = ReqwestFetcher::with_policy(config.network_policy())
        .context("Failed to build HTTP client")?;
    let service = NewsService::new(
        Arc::new(fetcher),
        catalog.clone(),
        config.clone(),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    tracing::info!(
        bind = %config.bind,
        sources = catalog.len(),
        categories = catalog.all_categories().len(),
        "MCP server listening"
    );

    axum::serve(listener, mcp::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn run_verify(
    config: &Config,
    input: Option<&Path>,
    verified_out: &Path,
    failed_out: &Path,
    concurrency: usize,
) -> Result<()> {
    let sources = match input {
        Some(path) => verify::read_sources(path)?,
        None => Catalog::load(config.sources_file.as_deref()).all().to_vec(),
    };
    println!("Testing {} sources...", sources.len());

    let (progress_tx, mut progress_rx) = mpsc::channel::<(usize, usize)>(32);
    let progress = tokio::spawn(async move {
        while let Some((done, total)) = progress_rx.recv().await {
            eprint!("\r[{}/{}]", done, total);
        }
        eprintln!();
    });

    let fetcher = ReqwestFetcher::with_policy(config.network_policy())
        .context("Failed to build HTTP client")?;
    let report = verify::verify_sources(
        &fetcher,
        sources,
        &config.feed_settings(),
        concurrency,
        Some(progress_tx),
    )
    .await;
    progress.await.context("Progress reporter failed")?;

    verify::write_json(verified_out, &report.verified)?;
    verify::write_json(failed_out, &report.failed)?;

    let rate = if report.total() == 0 {
        0.0
    } else {
        report.verified.len() as f64 * 100.0 / report.total() as f64
    };
    println!("Verified: {} sources ({:.1}%)", report.verified.len(), rate);
    println!("Failed: {} sources", report.failed.len());
    println!("Verified sources saved to: {}", verified_out.display());
    println!("Failed sources saved to: {}", failed_out.display());

    if !report.failed.is_empty() {
        println!("\nFailed sources:");
        for (i, failed) in report.failed.iter().enumerate() {
            println!(
                "  {}. {} ({}) - {}",
                i + 1,
                failed.source.name,
                failed.source.category,
                failed.error
            );
        }
    }

    println!("\nVerified sources by category:");
    for (category, count) in report.verified_by_category() {
        println!("  {:<15}: {} sources", category, count);
    }

    Ok(())
}
