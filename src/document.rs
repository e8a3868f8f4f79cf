//! Document text loading.
//!
//! Text-native PDFs are read with `pdf_extract`. Pages that carry no
//! extractable text are rendered to grayscale bitmaps with `pdftoppm` and
//! passed through the `tesseract` CLI, using a page-segmentation mode
//! suited to sparse tabular text. Rendered images live in a temporary
//! directory that is removed when it goes out of scope, on every exit path.

use crate::error::{ExtractionError, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Configuration for page rendering and OCR.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language (default: "eng").
    pub language: String,
    /// Path to the tesseract binary (relies on PATH by default).
    pub tesseract_path: String,
    /// Path to the pdftoppm binary used for page rendering.
    pub pdftoppm_path: String,
    /// Tesseract page segmentation mode. 6 ("assume a single uniform block
    /// of text") works well for statement tables.
    pub page_segmentation_mode: u32,
    /// Render resolution in DPI.
    pub render_dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tesseract_path: "tesseract".to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            page_segmentation_mode: 6,
            render_dpi: 300,
        }
    }
}

/// Extracts the structured (text-layer) content of the whole document.
pub fn extract_structured_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Splits whole-document text into per-page chunks on form feeds. Always
/// returns at least one chunk so page numbering stays 1-based and stable.
pub fn page_texts(full_text: &str) -> Vec<String> {
    full_text.split('\u{c}').map(str::to_string).collect()
}

/// Returns the full document text: structured extraction first, then an
/// OCR sweep over every page. Signals [`ExtractionError::NoContentExtracted`]
/// when neither strategy yields non-blank text.
pub fn load_document_text(path: &Path, config: &OcrConfig) -> Result<String> {
    let structured = match extract_structured_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Structured text extraction failed: {}", e);
            String::new()
        }
    };
    if !structured.trim().is_empty() {
        return Ok(structured);
    }

    info!("No structured text layer, running OCR over the whole document");
    let ocr_text = match ocr_document(path, config) {
        Ok(text) => text,
        Err(e) => {
            warn!("Document OCR failed: {}", e);
            String::new()
        }
    };

    if ocr_text.trim().is_empty() {
        Err(ExtractionError::NoContentExtracted)
    } else {
        Ok(ocr_text)
    }
}

/// Returns plain text for one page (1-based): the structured text layer if
/// it has content, otherwise OCR of the rendered page.
pub fn load_page_text(path: &Path, page: usize, config: &OcrConfig) -> Result<String> {
    let structured = extract_structured_text(path).unwrap_or_default();
    if let Some(text) = page_texts(&structured).get(page.saturating_sub(1)) {
        if !text.trim().is_empty() {
            return Ok(text.clone());
        }
    }

    let text = ocr_page(path, page, config)?;
    if text.trim().is_empty() {
        Err(ExtractionError::NoContentExtracted)
    } else {
        Ok(text)
    }
}

/// Renders one page and OCRs it. The rendered image is scoped to a
/// temporary directory and released regardless of OCR success or failure.
pub fn ocr_page(path: &Path, page: usize, config: &OcrConfig) -> Result<String> {
    let scratch = TempDir::new()?;
    let images = render_pages(path, scratch.path(), Some(page), config)?;

    let mut text = String::new();
    for image in &images {
        text.push_str(&run_tesseract(image, config)?);
        text.push('\n');
    }
    Ok(text.trim().to_string())
}

/// Renders every page and OCRs each in order, concatenating the results
/// with form feeds so downstream page splitting keeps working.
pub fn ocr_document(path: &Path, config: &OcrConfig) -> Result<String> {
    let scratch = TempDir::new()?;
    let images = render_pages(path, scratch.path(), None, config)?;

    let mut pages = Vec::with_capacity(images.len());
    for image in &images {
        pages.push(run_tesseract(image, config)?);
    }
    Ok(pages.join("\u{c}").trim().to_string())
}

/// Runs pdftoppm into `out_dir` and returns the produced images sorted by
/// name (pdftoppm zero-pads page numbers, so lexical order is page order).
fn render_pages(
    path: &Path,
    out_dir: &Path,
    page: Option<usize>,
    config: &OcrConfig,
) -> Result<Vec<PathBuf>> {
    let prefix = out_dir.join("page");
    let mut command = Command::new(&config.pdftoppm_path);
    command
        .arg("-png")
        .arg("-gray")
        .arg("-r")
        .arg(config.render_dpi.to_string());

    if let Some(page) = page {
        command
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string());
    }

    let output = command
        .arg(path.as_os_str())
        .arg(prefix.as_os_str())
        .output()
        .map_err(|e| ExtractionError::PageRenderFailed {
            page: page.unwrap_or(0),
            reason: format!("could not run {}: {}", config.pdftoppm_path, e),
        })?;

    if !output.status.success() {
        return Err(ExtractionError::PageRenderFailed {
            page: page.unwrap_or(0),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let mut images: Vec<PathBuf> = std::fs::read_dir(out_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    images.sort();

    if images.is_empty() {
        return Err(ExtractionError::PageRenderFailed {
            page: page.unwrap_or(0),
            reason: "renderer produced no images".to_string(),
        });
    }

    debug!("Rendered {} page image(s)", images.len());
    Ok(images)
}

fn run_tesseract(image: &Path, config: &OcrConfig) -> Result<String> {
    let output = Command::new(&config.tesseract_path)
        .arg(image.as_os_str())
        .arg("stdout")
        .arg("-l")
        .arg(&config.language)
        .arg("--psm")
        .arg(config.page_segmentation_mode.to_string())
        .output()
        .map_err(|e| {
            ExtractionError::OcrFailed(format!(
                "could not run {} (is it installed?): {}",
                config.tesseract_path, e
            ))
        })?;

    if !output.status.success() {
        return Err(ExtractionError::OcrFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_texts_split_on_form_feed() {
        let pages = page_texts("page one\u{c}page two\u{c}page three");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1], "page two");
    }

    #[test]
    fn test_page_texts_single_page() {
        let pages = page_texts("only page");
        assert_eq!(pages, vec!["only page".to_string()]);
    }

    #[test]
    fn test_ocr_config_default() {
        let config = OcrConfig::default();
        assert_eq!(config.page_segmentation_mode, 6);
        assert_eq!(config.language, "eng");
    }
}
