//! PDF text extraction with ordered backend fallback.
//!
//! Backends are tried in priority order. A backend that errors or panics
//! counts as "no text" and the next one is tried; the first non-empty result
//! wins. Nothing partial is ever returned.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

pub mod backends;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no PDF extraction backend is available (build with the `pdf-extract` or `lopdf` feature)")]
    Unavailable,

    #[error("could not extract text from {}: {reason}. Please ensure the PDF is not encrypted or corrupted", path.display())]
    Failed { path: PathBuf, reason: String },
}

/// A single way of turning a PDF into per-page text.
pub trait ExtractionBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Text of each page in page order. Pages may be empty.
    fn extract_pages(&self, path: &Path) -> anyhow::Result<Vec<String>>;
}

pub struct TextExtractor {
    backends: Vec<Box<dyn ExtractionBackend>>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(backends::available())
    }
}

impl TextExtractor {
    pub fn new(backends: Vec<Box<dyn ExtractionBackend>>) -> Self {
        Self { backends }
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Extract the document's text, trimmed and guaranteed non-empty.
    pub fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if self.backends.is_empty() {
            return Err(ExtractionError::Unavailable);
        }

        if !path.is_file() {
            return Err(ExtractionError::Failed {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let mut outcomes = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            debug!("Trying extraction backend {}", backend.name());

            match run_backend(backend.as_ref(), path) {
                Ok(pages) => {
                    let text = join_pages(&pages);
                    if !text.is_empty() {
                        info!(
                            "{} extracted {} characters from {} page(s)",
                            backend.name(),
                            text.chars().count(),
                            pages.len()
                        );
                        return Ok(text);
                    }
                    warn!("{} produced no text, trying next backend", backend.name());
                    outcomes.push(format!("{}: no text", backend.name()));
                }
                Err(e) => {
                    warn!("{} failed, trying next backend: {:#}", backend.name(), e);
                    outcomes.push(format!("{}: {:#}", backend.name(), e));
                }
            }
        }

        Err(ExtractionError::Failed {
            path: path.to_path_buf(),
            reason: outcomes.join("; "),
        })
    }
}

/// Run a backend, turning a library panic into an ordinary error.
fn run_backend(backend: &dyn ExtractionBackend, path: &Path) -> anyhow::Result<Vec<String>> {
    match panic::catch_unwind(AssertUnwindSafe(|| backend.extract_pages(path))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            anyhow::bail!("backend panicked: {}", message)
        }
    }
}

/// Newline-joined page texts, skipping blank pages, trimmed.
fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}
