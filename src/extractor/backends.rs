use super::ExtractionBackend;

/// Backends compiled into this build, in priority order.
pub fn available() -> Vec<Box<dyn ExtractionBackend>> {
    #[allow(unused_mut)]
    let mut backends: Vec<Box<dyn ExtractionBackend>> = Vec::new();

    #[cfg(feature = "pdf-extract")]
    backends.push(Box::new(PdfExtractBackend));

    #[cfg(feature = "lopdf")]
    backends.push(Box::new(LopdfBackend));

    backends
}

// ============================================================================
// pdf-extract (layout-aware, primary)
// ============================================================================

#[cfg(feature = "pdf-extract")]
pub struct PdfExtractBackend;

#[cfg(feature = "pdf-extract")]
impl ExtractionBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract_pages(&self, path: &std::path::Path) -> anyhow::Result<Vec<String>> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| anyhow::anyhow!("pdf-extract failed: {}", e))
    }
}

// ============================================================================
// lopdf (generic page reader, fallback)
// ============================================================================

#[cfg(feature = "lopdf")]
pub struct LopdfBackend;

#[cfg(feature = "lopdf")]
impl ExtractionBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract_pages(&self, path: &std::path::Path) -> anyhow::Result<Vec<String>> {
        let mut doc = lopdf::Document::load(path)
            .map_err(|e| anyhow::anyhow!("failed to load PDF: {}", e))?;

        // Owner-password-only documents open with an empty user password
        if doc.is_encrypted() {
            doc.decrypt("")
                .map_err(|e| anyhow::anyhow!("PDF is encrypted and needs a password: {}", e))?;
        }

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::debug!("lopdf skipped page {}: {}", page_number, e);
                }
            }
        }
        Ok(pages)
    }
}
