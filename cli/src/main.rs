use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use mars_core::{get_default_config_file, MarsClient, MarsConfig};

mod app;
mod cli;
mod logging;
mod output;

use crate::cli::{Args, Command};
use crate::logging::{init_logging, report_error};
use crate::output::{print_usage_instructions, RenderOptions};

/// Layer command-line flags over the config file
fn load_config(args: &Args) -> Result<MarsConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_default_config_file().context("Failed to locate config file")?,
    };

    let file_config = MarsConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let overrides = MarsConfig {
        backend_url: args.backend_url.clone(),
        render_markdown: args.markdown.then_some(true),
        ..Default::default()
    };

    Ok(file_config.merge(&overrides))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(config.log_level.as_deref(), args.verbose);
    log::info!("Using backend at {}", config.backend_url());

    let client = MarsClient::new(&config).context("Failed to initialize backend client")?;

    let options = RenderOptions {
        snippet_length: config.snippet_length(),
        full_raw_data: matches!(args.command, Some(Command::Analyze { full: true })),
        markdown: config.render_markdown(),
    };

    let outcome = match args.command {
        Some(Command::Analyze { .. }) => app::run_analysis(&client, &options).await,
        Some(Command::Ingest) => app::run_ingest(&client).await,
        Some(Command::Chat { ingest }) => {
            app::run_interactive_chat(&client, &options, ingest).await
        }
        Some(Command::Ask { question }) => {
            app::run_single_question(question, &client, &options).await
        }
        None => {
            print_usage_instructions();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        report_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
