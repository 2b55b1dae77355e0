//! Songforge server entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use songforge::application::GenerateTrackUseCase;
use songforge::domain::config::AppConfig;
use songforge::infrastructure::{
    env_config, HuggingFaceLyricist, ReplicateSynthesizer, TokioSleeper, TomlConfigStore,
};
use songforge::server;

/// Songforge - prompt-to-song web backend
#[derive(Parser, Debug)]
#[command(name = "songforge")]
#[command(version)]
#[command(about = "Generates lyrics with a hosted language model and sings them via a hosted synthesis API")]
struct Cli {
    /// Address to listen on (e.g. 127.0.0.1:8080)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // .env is optional; a missing file is fine
    dotenvy::dotenv().ok();

    let store = match cli.config {
        Some(path) => TomlConfigStore::with_path(path),
        None => TomlConfigStore::new(),
    };

    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load {}: {}", store.path().display(), e);
            return ExitCode::FAILURE;
        }
    };

    let cli_config = AppConfig {
        bind: cli.bind,
        ..AppConfig::empty()
    };

    // Precedence: defaults < file < environment < CLI
    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config);

    let Some(hf_token) = config.hf_api_token.clone() else {
        error!(
            "Missing Hugging Face API token. Set HF_API_TOKEN or add hf_api_token to {}",
            store.path().display()
        );
        return ExitCode::FAILURE;
    };

    let Some(replicate_token) = config.replicate_api_token.clone() else {
        error!(
            "Missing Replicate API token. Set REPLICATE_API_TOKEN or add replicate_api_token to {}",
            store.path().display()
        );
        return ExitCode::FAILURE;
    };

    // Adapters are wired once and shared for the process lifetime
    let mut lyricist = HuggingFaceLyricist::new(hf_token);
    if let Some(model) = config.lyrics_model.clone() {
        lyricist = lyricist.with_model(model);
    }
    if let Some(url) = config.lyrics_api_url.clone() {
        lyricist = lyricist.with_base_url(url);
    }

    let mut synthesizer = ReplicateSynthesizer::new(replicate_token);
    if let Some(version) = config.synthesis_version.clone() {
        synthesizer = synthesizer.with_version(version);
    }
    if let Some(url) = config.synthesis_api_url.clone() {
        synthesizer = synthesizer.with_base_url(url);
    }

    let use_case = Arc::new(GenerateTrackUseCase::new(
        lyricist,
        synthesizer,
        TokioSleeper,
    ));

    let app = server::router(use_case);

    let bind = config.bind_or_default();
    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Listening on http://{}", bind);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        // Filter out noisy dependencies (these parse strings are static and known-valid)
        .add_directive("reqwest=warn".parse().expect("valid directive for reqwest"))
        .add_directive("hyper=warn".parse().expect("valid directive for hyper"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
