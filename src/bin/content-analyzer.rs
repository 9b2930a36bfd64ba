//! Server binary for content-analyzer.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ServiceConfig`, checks the external engines and serves HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use content_analyzer::pipeline::render::bind_pdfium;
use content_analyzer::{create_router, AppState, ServiceConfig, TesseractEngine};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"ENDPOINTS:
  POST /extract   multipart upload, field "files" (pdf, png, jpg, jpeg, tiff, bmp)
  POST /analyze   {"text": "..."} → {"analysis": "..."}
  GET  /          health check

ANALYSIS PROVIDER:
  Detected from OPENAI_API_KEY, GEMINI_API_KEY, ANTHROPIC_API_KEY, … unless
  --provider / --model are given. Keys are only ever read from the environment.

ENGINES:
  tesseract must be installed (apt install tesseract-ocr).
  libpdfium is looked up via --pdfium-lib, then ./, then the system path.
"#;

/// Extract text from PDFs and images, and get LLM feedback on it, over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "content-analyzer",
    version,
    about = "Extract text from PDFs/images and get LLM style feedback over HTTP",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "CONTENT_ANALYZER_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Rendering DPI for OCR of text-less PDF pages (72–600).
    #[arg(long, env = "CONTENT_ANALYZER_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Tesseract executable.
    #[arg(long, env = "CONTENT_ANALYZER_TESSERACT", default_value = "tesseract")]
    tesseract: PathBuf,

    /// Path to the pdfium shared library.
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// LLM model ID.
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// Maximum request body size in MiB.
    #[arg(long, env = "CONTENT_ANALYZER_MAX_UPLOAD_MB", default_value_t = 50)]
    max_upload_mb: usize,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CONTENT_ANALYZER_VERBOSE")]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> Result<ServiceConfig> {
        let mut builder = ServiceConfig::builder()
            .dpi(self.dpi)
            .tesseract_cmd(self.tesseract.clone())
            .max_upload_bytes(self.max_upload_mb.saturating_mul(1024 * 1024));

        if let Some(ref path) = self.pdfium_lib {
            builder = builder.pdfium_lib_path(path.clone());
        }
        if let Some(ref provider) = self.provider {
            builder = builder.provider_name(provider.clone());
        }
        if let Some(ref model) = self.model {
            builder = builder.model(model.clone());
        }

        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = cli.to_config()?;
    info!("Starting content-analyzer with {:?}", config);

    // ── Engine checks ────────────────────────────────────────────────────
    // Missing engines only break the files that need them, so warn and keep going.
    let tesseract = TesseractEngine::new(config.tesseract_cmd.clone());
    if !tokio::task::block_in_place(|| tesseract.is_available()) {
        warn!(
            "'{}' is not runnable; image OCR and scanned PDF pages will fail. \
             Install with: apt install tesseract-ocr",
            tesseract.binary().display()
        );
    }
    if let Err(e) = tokio::task::block_in_place(|| bind_pdfium(config.pdfium_lib_path.as_deref())) {
        warn!("{}", e);
    }

    // ── Serve ────────────────────────────────────────────────────────────
    let app = create_router(AppState::from_config(&config), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!("Listening on http://{}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
