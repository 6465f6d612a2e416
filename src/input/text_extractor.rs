//! Text extraction from the supported file formats

use crate::error::{AnalyzerError, Result};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(AnalyzerError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AnalyzerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        ensure_nonempty(text, path)
    }
}

/// A parseable PDF with no extractable text (scanned pages, image-only) is a
/// data-quality failure, and downstream treats it as blocking.
fn ensure_nonempty(text: String, path: &Path) -> Result<String> {
    if text.trim().is_empty() {
        Err(AnalyzerError::PdfExtraction(format!(
            "could not extract text from PDF '{}'",
            path.display()
        )))
    } else {
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(AnalyzerError::Io)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pdf_text_is_blocking() {
        let err = ensure_nonempty(String::new(), Path::new("scan.pdf")).unwrap_err();
        assert!(err.to_string().contains("could not extract text from PDF"));

        let err = ensure_nonempty("  \n\t ".to_string(), Path::new("scan.pdf")).unwrap_err();
        assert!(err.to_string().contains("could not extract text from PDF"));
    }

    #[test]
    fn test_nonempty_pdf_text_passes_through() {
        let text = ensure_nonempty("page one".to_string(), Path::new("cv.pdf")).unwrap();
        assert_eq!(text, "page one");
    }
}
