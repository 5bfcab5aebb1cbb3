//! MIG Bounds CLI
//!
//! Updates the minimum and maximum replica counts of the autoscaler
//! attached to a Compute Engine managed instance group.

mod client;
mod commands;
mod config;
mod output;

use anyhow::{bail, Context, Result};
use autoscaler_lib::{init_tracing, BoundsRequest, LogFormat, MergeMode, RequestContext, ResizeRequest};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// MIG Bounds CLI
#[derive(Parser)]
#[command(name = "mig-bounds")]
#[command(author, version, about = "Update min/max replicas of a managed instance group autoscaler", long_about = None)]
pub struct Cli {
    /// Project ID (falls back to `project` in the config file)
    #[arg(long)]
    pub project: Option<String>,

    /// Region of the managed regional instance group, e.g. asia-northeast1
    #[arg(long)]
    pub region: Option<String>,

    /// Zone of the managed instance group, e.g. asia-northeast1-a
    #[arg(long)]
    pub zone: Option<String>,

    /// Name of the managed instance group
    #[arg(long)]
    pub mig: String,

    /// The minimum number of replicas that the autoscaler can scale down to (0 keeps the current value)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min: i64,

    /// The maximum number of instances that the autoscaler can scale up to (0 keeps the current value)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub max: i64,

    /// Show the merged bounds without updating the autoscaler
    #[arg(long)]
    pub dry_run: bool,

    /// Refuse to write negative or inverted bounds
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Compute Engine API base URL
    #[arg(long, env = "MIG_BOUNDS_API_URL")]
    pub api_url: Option<String>,

    /// OAuth access token (uses Application Default Credentials if not specified)
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Give up after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to config file (defaults to ~/.config/mig-bounds/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format (text or json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Build the immutable request for this invocation.
    ///
    /// An empty `--region` or `--zone` counts as unset; only two non-empty
    /// values conflict.
    fn resize_request(&self, project: String) -> Result<ResizeRequest> {
        let region = self.region.clone().unwrap_or_default();
        let zone = self.zone.clone().unwrap_or_default();
        if !region.is_empty() && !zone.is_empty() {
            bail!("the argument '--region' cannot be used with '--zone'");
        }

        Ok(ResizeRequest {
            project,
            region,
            zone,
            mig: self.mig.clone(),
            bounds: BoundsRequest {
                min: self.min,
                max: self.max,
            },
            mode: if self.strict {
                MergeMode::Strict
            } else {
                MergeMode::Compatible
            },
            dry_run: self.dry_run,
        })
    }

    fn load_config(&self) -> Result<config::Config> {
        match self.config.as_deref() {
            Some(path) => config::Config::load_from(path),
            None => config::Config::load(),
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Logging must be up before a bad config file is reported.
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(cli.verbose, cli.log_format.unwrap_or_default());
            return Err(err);
        }
    };

    init_tracing(
        cli.verbose,
        cli.log_format.or(config.log_format).unwrap_or_default(),
    );

    let project = cli
        .project
        .clone()
        .or(config.project.clone())
        .filter(|p| !p.is_empty())
        .context("--project is required (or set `project` in the config file)")?;
    let request = cli.resize_request(project)?;

    let api_url = cli.api_url.clone().or(config.api_url.clone());
    let api = client::build_client(api_url.as_deref(), cli.access_token.clone())?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight request");
            on_interrupt.cancel();
        }
    });

    let mut ctx = RequestContext::new().with_cancellation(cancel);
    if let Some(secs) = cli.timeout.or(config.timeout_secs) {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    commands::resize::run_resize(&ctx, api, &request, cli.format).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!(error = %format!("{:#}", err), "Autoscaler update failed");
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
