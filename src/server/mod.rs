//! HTTP surface: `GET /`, `POST /extract`, `POST /analyze`.

mod handlers;
mod routes;

pub use handlers::AppError;
pub use routes::create_router;

use crate::config::ServiceConfig;
use crate::intake::Intake;
use crate::pipeline::llm::{Analyst, LlmAnalyst};
use std::sync::Arc;

/// Shared per-process handles. Holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<Intake>,
    pub analyst: Arc<dyn Analyst>,
}

impl AppState {
    pub fn new(intake: Intake, analyst: Arc<dyn Analyst>) -> Self {
        Self {
            intake: Arc::new(intake),
            analyst,
        }
    }

    /// Tesseract + pdfium + `edgequake-llm`, as configured.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            Intake::from_config(config),
            Arc::new(LlmAnalyst::from_config(config)),
        )
    }
}
