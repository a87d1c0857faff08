//! medtriage: symptom triage service and command-line classifier.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medtriage::api::{start_server, ApiContext};
use medtriage::config::{self, AppConfig};
use medtriage::service::TriageService;

#[derive(Parser)]
#[command(name = "medtriage")]
#[command(about = "Rule-based medical symptom triage", long_about = None)]
#[command(version = config::APP_VERSION)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args)]
struct CommonArgs {
    /// Directory holding the knowledge-base JSON files
    #[arg(long, global = true, env = "MEDTRIAGE_KNOWLEDGE_DIR")]
    knowledge_dir: Option<PathBuf>,

    /// Base URL of a LibreTranslate-compatible server (translation is off when unset)
    #[arg(long, global = true, env = "MEDTRIAGE_TRANSLATE_URL")]
    translate_url: Option<String>,

    /// Canonical language the knowledge base is written in
    #[arg(long, global = true, env = "MEDTRIAGE_LANGUAGE", default_value = config::CANONICAL_LANGUAGE)]
    language: String,

    /// Timeout for outbound HTTP calls, in seconds
    #[arg(long, global = true, env = "MEDTRIAGE_HTTP_TIMEOUT", default_value_t = config::DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, env = "MEDTRIAGE_BIND", default_value = config::DEFAULT_BIND_ADDR)]
        bind: SocketAddr,

        /// Base URL of a Whisper-compatible transcription server (audio endpoint is off when unset)
        #[arg(long, env = "MEDTRIAGE_TRANSCRIBE_URL")]
        transcribe_url: Option<String>,

        /// Transcription model name sent to the server
        #[arg(long, env = "MEDTRIAGE_TRANSCRIBE_MODEL", default_value = config::DEFAULT_TRANSCRIBE_MODEL)]
        transcribe_model: String,

        /// Largest accepted audio upload, in bytes
        #[arg(long, env = "MEDTRIAGE_MAX_AUDIO_BYTES", default_value_t = config::DEFAULT_MAX_AUDIO_BYTES)]
        max_audio_bytes: usize,
    },

    /// Classify one symptom description and print the result as JSON
    Classify {
        /// Free-text symptom description
        text: String,
    },
}

impl CommonArgs {
    fn to_config(&self) -> AppConfig {
        let mut cfg = AppConfig {
            canonical_language: self.language.clone(),
            translate_url: self.translate_url.clone(),
            http_timeout_secs: self.http_timeout,
            ..AppConfig::default()
        };
        if let Some(dir) = &self.knowledge_dir {
            cfg.knowledge_dir = dir.clone();
        }
        cfg
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = cli.common.to_config();

    match cli.command {
        Commands::Serve {
            bind,
            transcribe_url,
            transcribe_model,
            max_audio_bytes,
        } => {
            cfg.bind_addr = bind;
            cfg.transcribe_url = transcribe_url;
            cfg.transcribe_model = transcribe_model;
            cfg.max_audio_bytes = max_audio_bytes;
            serve(cfg)
        }
        Commands::Classify { text } => classify(&cfg, &text),
    }
}

fn load_service(cfg: &AppConfig) -> Result<TriageService> {
    tracing::info!(
        dir = %cfg.knowledge_dir.display(),
        "{} v{} loading knowledge base",
        config::APP_NAME,
        config::APP_VERSION
    );
    let service = TriageService::from_config(cfg)
        .with_context(|| format!("loading knowledge base from {}", cfg.knowledge_dir.display()))?;
    if service.knowledge().is_empty() {
        tracing::warn!(
            dir = %cfg.knowledge_dir.display(),
            "Knowledge base is empty, every input will route to General"
        );
    }
    Ok(service)
}

fn classify(cfg: &AppConfig, text: &str) -> Result<()> {
    let service = load_service(cfg)?;
    let result = service.analyze_text(text);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn serve(cfg: AppConfig) -> Result<()> {
    let service = Arc::new(load_service(&cfg)?);
    let ctx = ApiContext::new(service).with_max_audio_bytes(cfg.max_audio_bytes);

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async move {
        let mut server = start_server(ctx, cfg.bind_addr).await?;
        tracing::info!(
            addr = %server.session.server_addr,
            session = %server.session.session_id,
            "Listening"
        );

        tokio::signal::ctrl_c().await.context("waiting for ctrl-c")?;
        server.shutdown();
        server.wait().await;
        Ok(())
    })
}
