//! Request and response types.
//!
//! Everything here lives for one request only. The JSON shapes are the wire
//! contract of the HTTP endpoints, so field names are fixed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One file taken from the multipart upload.
#[derive(Clone)]
pub struct UploadedFile {
    pub filename: String,
    /// Client-supplied MIME type; empty when the client sent none.
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Where a PDF page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// The page's embedded text layer.
    NativeText,
    /// Rendered to a bitmap and recognised by OCR.
    OcrFallback,
    /// The OCR fallback failed; the text is a placeholder.
    ExtractionError,
}

/// Extraction outcome for a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    pub source: PageSource,
    pub text: String,
}

impl PageResult {
    /// The marker line that precedes the page's text.
    pub fn header(&self) -> String {
        match self.source {
            PageSource::NativeText => format!("--- page {} ---", self.page_num),
            PageSource::OcrFallback => format!("--- page {} (ocr) ---", self.page_num),
            PageSource::ExtractionError => format!("--- page {} (error) ---", self.page_num),
        }
    }

    /// Header line, newline, page text.
    pub fn to_chunk(&self) -> String {
        format!("{}\n{}", self.header(), self.text)
    }
}

/// Extraction outcome for one uploaded file.
///
/// `error` is omitted from the JSON on success; on failure `text` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub filename: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn success(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            error: None,
        }
    }

    pub fn failure(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Body of a successful `/extract` response, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub files: Vec<FileResult>,
}

/// Body of a `/analyze` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Body of a successful `/analyze` response: the model's raw reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
