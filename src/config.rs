//! Service configuration.
//!
//! Every knob lives in [`ServiceConfig`], built via [`ServiceConfigBuilder`].
//! The binary maps CLI flags and environment variables onto the builder;
//! library users and tests set only the fields they care about.
//!
//! Credentials for the hosted model are never part of this struct. The LLM
//! provider reads its API key from the process environment at call time.

use crate::error::ConfigError;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default rendering resolution for the OCR fallback.
pub const DEFAULT_DPI: u32 = 300;

/// Default upper bound for one `/extract` request body.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Configuration for the extraction and analysis service.
///
/// # Example
/// ```rust
/// use content_analyzer::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .dpi(200)
///     .tesseract_cmd("/usr/local/bin/tesseract")
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 200);
/// ```
#[derive(Clone)]
pub struct ServiceConfig {
    /// Resolution used when a PDF page has no text layer and must be
    /// rasterised for OCR. Range: 72–600. Default: 300.
    ///
    /// Tesseract is tuned for roughly 300 DPI input; lower values lose small
    /// print, higher values mostly cost memory.
    pub dpi: u32,

    /// Tesseract executable name or path. Default: `tesseract` (looked up on `PATH`).
    pub tesseract_cmd: PathBuf,

    /// Explicit pdfium shared library. If None, `./` and then the system
    /// library search path are tried.
    pub pdfium_lib_path: Option<PathBuf>,

    /// LLM provider name (e.g. "openai", "gemini", "anthropic").
    /// If None, the provider is auto-detected from the environment.
    pub provider_name: Option<String>,

    /// LLM model identifier. If None with a named provider,
    /// [`crate::pipeline::llm::DEFAULT_MODEL`] is used.
    pub model: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Maximum accepted request body in bytes. Default: 50 MiB.
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            tesseract_cmd: PathBuf::from("tesseract"),
            pdfium_lib_path: None,
            provider_name: None,
            model: None,
            provider: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("dpi", &self.dpi)
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(ConfigError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.tesseract_cmd.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "tesseract command must not be empty".into(),
            ));
        }
        if c.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "max upload size must be ≥ 1 byte".into(),
            ));
        }
        Ok(self.config)
    }
}
