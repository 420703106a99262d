use anyhow::Result;
use clap::Parser;
use hall_of_shame::aggregator::AggregatorConfig;
use hall_of_shame::cf_channel::CfCli;
use hall_of_shame::cf_repo::{CfRepo, CfRepoConfig};
use hall_of_shame::config::AppConfig;
use hall_of_shame::metadata::{self, HALL_OF_SHAME};
use hall_of_shame::output::{self, OutputFormat};
use hall_of_shame::pass;
use hall_of_shame::progress::{BarProgress, Progress, SilentProgress};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Rank Cloud Foundry apps by allocated-vs-used memory
#[derive(Debug, Parser)]
#[command(name = HALL_OF_SHAME.alias, version)]
#[command(about = HALL_OF_SHAME.help_text, override_usage = HALL_OF_SHAME.usage)]
struct Cli {
    #[arg(long, help = HALL_OF_SHAME.option_help("org").unwrap_or_default())]
    org: Option<String>,

    #[arg(
        long,
        requires = "org",
        help = HALL_OF_SHAME.option_help("space").unwrap_or_default()
    )]
    space: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Max stats requests in flight (overrides fetch.max_concurrency)
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Output format (overrides output.format)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    if let Some(n) = cli.concurrency {
        app_config.fetch.max_concurrency = n;
    }
    if let Some(format) = cli.output {
        app_config.output.format = format;
    }
    if cli.no_progress {
        app_config.output.progress = false;
    }
    app_config.validate()?;

    tracing::debug!(
        name = metadata::NAME,
        version = metadata::VERSION,
        plugin = metadata::PLUGIN_NAME,
        command = HALL_OF_SHAME.name,
        "starting"
    );
    if cli.org.is_some() || cli.space.is_some() {
        tracing::warn!(
            org = cli.org.as_deref(),
            space = cli.space.as_deref(),
            "--org/--space filtering is not implemented; reporting all visible apps"
        );
    }

    let repo = Arc::new(CfRepo::new(
        CfCli::new(app_config.cf.binary.clone()),
        CfRepoConfig {
            request_timeout: Duration::from_secs(app_config.fetch.request_timeout_secs),
            strict_listing: app_config.listing.strict,
            follow_pages: app_config.listing.follow_pages,
        },
    ));
    let progress: Arc<dyn Progress> =
        if app_config.output.progress && std::io::stderr().is_terminal() {
            Arc::new(BarProgress::new())
        } else {
            Arc::new(SilentProgress)
        };

    let result = pass::run_pass(
        repo,
        progress,
        &AggregatorConfig {
            max_concurrency: app_config.fetch.max_concurrency,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("listing apps: {}", e))?;

    println!("{}", output::render(app_config.output.format, &result.ranked)?);
    Ok(())
}
