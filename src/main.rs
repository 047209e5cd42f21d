//! Prompt server entry point.
//!
//! Parses the command line, layers it over the environment configuration,
//! loads the prompts directory and serves it over the configured transport.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_mcp_server::cli::{Cli, version_banner};
use prompt_mcp_server::core::{Config, LoggingConfig, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    cli.apply(&mut config);

    if cli.version {
        println!("{}", version_banner(&config));
        return Ok(());
    }

    init_logging(&config.logging);

    let directory = std::path::absolute(&config.prompts.directory).with_context(|| {
        format!(
            "failed to resolve prompts directory {}",
            config.prompts.directory.display()
        )
    })?;
    if !directory.is_dir() {
        bail!("prompts directory does not exist: {}", directory.display());
    }
    config.prompts.directory = directory;

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Prompts directory: {}", config.prompts.directory.display());

    let server = McpServer::new(config.clone()).context("failed to load prompts")?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
