//! Document opening: PDF statements via lopdf, anything else as
//! already-extracted text.

use lopdf::Document;
use tracing::warn;

use crate::error::{ExtractError, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// pdftotext-style page delimiter for plain text inputs.
const PAGE_DELIMITER: char = '\x0c';

/// Split a document's bytes into per-page text, in page order.
///
/// Bytes starting with the PDF magic are loaded with lopdf and decrypted
/// with `password` when the document is encrypted. Any other byte stream is
/// treated as extracted statement text (lossy UTF-8) with pages separated by
/// form-feed.
pub fn read_pages(bytes: &[u8], password: &str) -> Result<Vec<String>> {
    if bytes.starts_with(PDF_MAGIC) {
        pdf_pages(bytes, password)
    } else {
        Ok(text_pages(bytes))
    }
}

fn text_pages(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .split(PAGE_DELIMITER)
        .map(str::to_string)
        .collect()
}

fn pdf_pages(bytes: &[u8], password: &str) -> Result<Vec<String>> {
    let mut doc =
        Document::load_mem(bytes).map_err(|err| ExtractError::Corrupt(err.to_string()))?;

    if doc.is_encrypted() {
        doc.decrypt(password)
            .map_err(|_| ExtractError::WrongCredential)?;
    }

    let mut pages = Vec::new();
    for &page_num in doc.get_pages().keys() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => pages.push(text),
            Err(err) => {
                // Unreadable page text yields zero matches, not a failure.
                warn!(page = page_num, error = %err, "could not extract page text");
                pages.push(String::new());
            }
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_splits_on_form_feed() {
        let bytes = b"page one\x0cpage two\x0cpage three";
        let pages = read_pages(bytes, "").unwrap();
        assert_eq!(pages, vec!["page one", "page two", "page three"]);
    }

    #[test]
    fn test_text_input_single_page() {
        let pages = read_pages(b"just one page", "").unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_corrupt_pdf_is_open_error() {
        let err = read_pages(b"%PDF-1.7 but truncated garbage", "").unwrap_err();
        assert!(matches!(err, ExtractError::Corrupt(_)));
        assert!(!err.is_credential_failure());
    }
}
