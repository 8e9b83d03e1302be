//! Command handlers for the pdfchat CLI.

mod ask;
mod chat;
mod models;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use models::ModelsCommand;

use pdfchat_core::{AppError, AppResult};
use std::path::Path;

/// Enforce the upload allow-list: only PDF files are accepted.
pub(crate) fn ensure_pdf(path: &Path) -> AppResult<()> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        Ok(())
    } else {
        Err(AppError::InvalidRequest(
            "Only PDF files are allowed.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_accepts_pdf_extension() {
        assert!(ensure_pdf(&PathBuf::from("report.pdf")).is_ok());
        assert!(ensure_pdf(&PathBuf::from("REPORT.PDF")).is_ok());
    }

    #[test]
    fn test_rejects_other_extensions() {
        assert!(ensure_pdf(&PathBuf::from("notes.txt")).is_err());
        assert!(ensure_pdf(&PathBuf::from("archive.pdf.zip")).is_err());
        assert!(ensure_pdf(&PathBuf::from("no_extension")).is_err());
    }
}
