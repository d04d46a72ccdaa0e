use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_proxy::{
    cache::Cache,
    config::{Config, ConfigOverrides},
    services::{LookupService, SpeciesClient, TranslationClient},
    sources::{FunTranslationsSource, PokeApiSpeciesSource, funtranslations, pokeapi},
    utils::StandardHttpClient,
    web::{AppState, WebServer, shutdown_signal},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "pokedex-proxy")]
#[command(version)]
#[command(about = "Species lookup service with optional fun translations")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Species source base URL (overrides config file)
    #[arg(long, value_name = "URL")]
    species_url: Option<String>,

    /// Translation source base URL (overrides config file)
    #[arg(long, value_name = "URL")]
    translation_url: Option<String>,
}

fn init_tracing(cli: &Cli) {
    let log_filter = if cli.log_level == "trace" {
        format!("pokedex_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("pokedex_proxy={}", cli.log_level)
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_filter.into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match cli.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    info!("Starting Pokedex Proxy v{}", env!("CARGO_PKG_VERSION"));

    // CLI arguments take precedence over file and environment
    let overrides = ConfigOverrides {
        host: cli.host,
        port: cli.port,
        species_base_url: cli.species_url,
        translation_base_url: cli.translation_url,
    };
    let config = Config::load(&cli.config, &overrides)?;
    info!("Configuration loaded from: {}", cli.config);

    info!(
        species = %config.upstream.species_base_url,
        translation = %config.upstream.translation_base_url,
        timeout = ?config.upstream.request_timeout,
        "Using upstream sources"
    );

    let user_agent = config.upstream.user_agent();
    let species_http = StandardHttpClient::new(
        pokeapi::SERVICE_NAME,
        config.upstream.request_timeout,
        &user_agent,
    )?;
    let translation_http = StandardHttpClient::new(
        funtranslations::SERVICE_NAME,
        config.upstream.request_timeout,
        &user_agent,
    )?;

    let species_cache = Cache::new("species");
    let translation_cache = config
        .cache
        .cache_translations
        .then(|| Cache::new("translations"));
    if translation_cache.is_none() {
        info!("Translation caching disabled");
    }

    let lookup_service = LookupService::new(
        SpeciesClient::new(
            Arc::new(PokeApiSpeciesSource::new(
                config.upstream.species_base_url.clone(),
                species_http,
            )),
            species_cache.clone(),
        ),
        TranslationClient::new(
            Arc::new(FunTranslationsSource::new(
                config.upstream.translation_base_url.clone(),
                translation_http,
            )),
            translation_cache.clone(),
        ),
    );

    let grace_period = config.web.shutdown_grace_period;
    let web_server = WebServer::new(AppState {
        lookup_service,
        species_cache,
        translation_cache,
        config,
    })?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );

    web_server
        .run_until(shutdown_signal(), grace_period)
        .await
        .inspect_err(|e| error!("Web server failed: {}", e))
}
