use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};
use tokio::net::TcpListener;
use tracing::{info, warn};
use weather_risk_core::{
    AssessmentClient, AssessmentQuery, AssessmentResponse, Config, server, service_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-risk", version, about = "Weather risk assessment service")]
pub struct Cli {
    /// Log filter, e.g. "info" or "weather_risk_core=debug". `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /assess` over HTTP.
    Serve {
        /// Address to bind, overriding the configured one.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Run a single assessment and print it.
    Assess(AssessArgs),

    /// Interactively edit the configuration file.
    Configure,
}

/// Values are passed through as raw strings so the CLI coerces exactly like the
/// HTTP endpoint does.
#[derive(Debug, Default, Args)]
pub struct AssessArgs {
    /// Latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Display name for the location.
    #[arg(long)]
    pub name: Option<String>,

    /// First day of the window (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the window (YYYY-MM-DD); defaults to the start date.
    #[arg(long)]
    pub end: Option<String>,

    /// Temperature unit: C or F.
    #[arg(long)]
    pub temp: Option<String>,

    /// Wind unit: MS or MPH.
    #[arg(long)]
    pub wind: Option<String>,

    /// "Very hot" cutoff, in the temperature unit.
    #[arg(long, allow_hyphen_values = true)]
    pub hot: Option<String>,

    /// "Very cold" cutoff, in the temperature unit.
    #[arg(long, allow_hyphen_values = true)]
    pub cold: Option<String>,

    /// "Very windy" cutoff, in the wind unit.
    #[arg(long, allow_hyphen_values = true)]
    pub windy: Option<String>,

    /// "Very wet" cutoff, daily precipitation in inches (F) or millimeters (C).
    #[arg(long, allow_hyphen_values = true)]
    pub wet: Option<String>,

    /// "Very uncomfortable" heat index cutoff, in the temperature unit.
    #[arg(long, allow_hyphen_values = true)]
    pub uncomfortable: Option<String>,

    /// Query this server instead of assessing locally.
    #[arg(long)]
    pub remote: Option<String>,

    /// Print the raw JSON body.
    #[arg(long)]
    pub json: bool,
}

impl AssessArgs {
    pub fn to_query(&self) -> AssessmentQuery {
        AssessmentQuery {
            location_name: self.name.clone(),
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            units_temp: self.temp.clone(),
            units_wind: self.wind.clone(),
            threshold_hot: self.hot.clone(),
            threshold_cold: self.cold.clone(),
            threshold_windy: self.windy.clone(),
            threshold_wet: self.wet.clone(),
            threshold_uncomfortable: self.uncomfortable.clone(),
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Serve { bind } => serve(config, bind).await,
            Command::Assess(args) => assess(&config, &args).await,
            Command::Configure => configure(config),
        }
    }
}

async fn serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    let addr = config.bind_addr()?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    server::serve(listener, service_from_config(&config), shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => warn!(error = %err, "could not listen for Ctrl-C; shutting down"),
    }
}

async fn assess(config: &Config, args: &AssessArgs) -> Result<()> {
    let response = fetch_assessment(config, args).await?;

    if args.json {
        let body =
            serde_json::to_string_pretty(&response).context("Failed to serialize assessment")?;
        println!("{body}");
    } else {
        print!("{}", output::render(&response));
    }

    Ok(())
}

async fn fetch_assessment(config: &Config, args: &AssessArgs) -> Result<AssessmentResponse> {
    let query = args.to_query();

    match args.remote.as_deref().or(config.remote_url()) {
        Some(url) => {
            info!(%url, "assessing via remote server");
            AssessmentClient::new(url).fetch(&query).await
        }
        None => {
            let request = query.into_request(Utc::now().date_naive());
            let response = service_from_config(config).assess(&request).await?;
            Ok(response)
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let bind = Text::new("Bind address for `weather-risk serve`:")
        .with_default(&config.server.bind)
        .prompt()?;
    config.server.bind = bind;
    config.bind_addr()?;

    let remote = Text::new("Remote server URL for `weather-risk assess` (empty for local):")
        .with_initial_value(config.client.remote_url.as_deref().unwrap_or_default())
        .prompt()?;
    config.client.remote_url = Some(remote.trim().to_string()).filter(|url| !url.is_empty());

    let seed = Text::new("Mock provider seed (empty for random values):")
        .with_initial_value(&config.provider.seed.map(|s| s.to_string()).unwrap_or_default())
        .prompt()?;
    config.provider.seed = parse_seed(&seed)?;

    config.provider.timeout_ms = CustomType::<u64>::new("Provider timeout in milliseconds:")
        .with_default(config.provider.timeout_ms)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

fn parse_seed(input: &str) -> Result<Option<u64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let seed = trimmed
        .parse::<u64>()
        .with_context(|| format!("Seed must be a non-negative integer, got '{trimmed}'"))?;
    Ok(Some(seed))
}
