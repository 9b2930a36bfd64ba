//! # content-analyzer
//!
//! Pull readable text out of uploaded PDFs and images, then ask a hosted
//! language model for stylistic feedback on it.
//!
//! ## Pipeline Overview
//!
//! ```text
//! POST /extract (multipart)
//!  │
//!  ├─ 1. Classify  extension / content-type → pdf | image | unsupported (400)
//!  ├─ 2. PDF       pdfium text layer per page, else render @300 DPI → OCR
//!  ├─ 3. Image     decode → RGB → tesseract
//!  └─ 4. Collect   one FileResult per upload, errors captured per file
//!
//! POST /analyze (json)
//!  └─ fixed prompt + text → edgequake-llm provider → raw reply
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use content_analyzer::{create_router, AppState, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Analysis provider auto-detected from OPENAI_API_KEY / GEMINI_API_KEY / …
//!     let config = ServiceConfig::default();
//!     let app = create_router(AppState::from_config(&config), config.max_upload_bytes);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## External engines
//!
//! | Engine | Used for | Lookup |
//! |--------|----------|--------|
//! | `tesseract` CLI | OCR of images and text-less PDF pages | `PATH`, or `ServiceConfig::tesseract_cmd` |
//! | `libpdfium` | PDF text layer and rasterisation | `PDFIUM_LIB_PATH`, `./`, system path |
//! | hosted LLM | `/analyze` | API key env vars read by `edgequake-llm` |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `content-analyzer` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod intake;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{AnalysisError, ConfigError, ExtractError, IntakeError, OcrError, PageError};
pub use intake::Intake;
pub use output::{
    AnalysisResult, AnalyzeRequest, ExtractResponse, FileResult, PageResult, PageSource,
    UploadedFile,
};
pub use pipeline::llm::{Analyst, LlmAnalyst};
pub use pipeline::ocr::{ImageOcr, OcrEngine, TesseractEngine};
pub use pipeline::pdf::PdfExtractor;
pub use pipeline::Extractor;
pub use server::{create_router, AppState};
