//! Text Extraction — turns an uploaded document into a plain-text string.
//!
//! The format is resolved from the declared filename extension, never sniffed
//! from content. Extraction output is trimmed; an empty result is valid (the
//! scorer's zero-result path handles it), not an error.

mod docx;
mod pdf;

use std::path::Path;

use crate::errors::AppError;

/// Supported upload formats, resolved from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("doc") => Ok(DocumentFormat::Doc),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some("txt") => Ok(DocumentFormat::Txt),
            Some(other) => Err(AppError::UnsupportedFormat(other.to_string())),
            None => Err(AppError::UnsupportedFormat("no file extension".to_string())),
        }
    }

    /// Resumes are restricted to document formats; plain text is only
    /// accepted for job descriptions.
    pub fn accepted_for_resume(&self) -> bool {
        !matches!(self, DocumentFormat::Txt)
    }
}

/// Extracts plain text from raw document bytes, trimmed.
pub fn extract(data: &[u8], format: DocumentFormat) -> Result<String, AppError> {
    let text = match format {
        DocumentFormat::Pdf => pdf::extract_text(data)?,
        // Legacy binary DOC files that the reader cannot parse surface as an
        // extraction failure for that analysis.
        DocumentFormat::Doc | DocumentFormat::Docx => docx::extract_text(data)?,
        DocumentFormat::Txt => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Extraction("file is not valid UTF-8 text".to_string()))?,
    };
    Ok(text.trim().to_string())
}

/// Reads a spooled upload from disk and extracts it. The caller owns the
/// temp file's lifetime; deletion happens on drop regardless of outcome.
pub fn extract_path(path: &Path, format: DocumentFormat) -> Result<String, AppError> {
    let data = std::fs::read(path)
        .map_err(|e| AppError::Extraction(format!("failed to read upload: {e}")))?;
    extract(&data, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename_maps_known_extensions() {
        assert_eq!(
            DocumentFormat::from_filename("cv.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("cv.doc").unwrap(),
            DocumentFormat::Doc
        );
        assert_eq!(
            DocumentFormat::from_filename("cv.docx").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_filename("jd.txt").unwrap(),
            DocumentFormat::Txt
        );
    }

    #[test]
    fn test_format_from_filename_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_filename("CV.PDF").unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        assert!(matches!(
            DocumentFormat::from_filename("cv.exe"),
            Err(AppError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_filename("no_extension"),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_txt_is_not_accepted_for_resumes() {
        assert!(!DocumentFormat::Txt.accepted_for_resume());
        assert!(DocumentFormat::Pdf.accepted_for_resume());
        assert!(DocumentFormat::Docx.accepted_for_resume());
    }

    #[test]
    fn test_txt_extraction_is_trimmed_pass_through() {
        let text = extract(b"  Python developer\n", DocumentFormat::Txt).unwrap();
        assert_eq!(text, "Python developer");
    }

    #[test]
    fn test_empty_txt_is_valid_output() {
        assert_eq!(extract(b"   \n ", DocumentFormat::Txt).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_txt_fails_extraction() {
        assert!(matches!(
            extract(&[0xff, 0xfe, 0x01], DocumentFormat::Txt),
            Err(AppError::Extraction(_))
        ));
    }

    #[test]
    fn test_garbage_pdf_fails_extraction() {
        assert!(matches!(
            extract(b"not a pdf at all", DocumentFormat::Pdf),
            Err(AppError::Extraction(_))
        ));
    }

    #[test]
    fn test_garbage_docx_fails_extraction() {
        assert!(matches!(
            extract(b"not a zip archive", DocumentFormat::Docx),
            Err(AppError::Extraction(_))
        ));
    }
}
