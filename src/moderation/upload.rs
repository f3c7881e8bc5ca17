//! Document submission and the (simulated) processing collaborator.

use crate::model::{ConsoleError, RiskConfig, RiskSeverity};

use mime_guess::mime::Mime;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const PDF_MIME: &str = "application/pdf";

/// A file chosen by the operator. Only its metadata crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl FileRef {
    /// Declared content type without parameters, or one guessed from the
    /// file name.
    pub fn mime(&self) -> Option<String> {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() => {
                let ct = ct.to_ascii_lowercase();
                match ct.parse::<Mime>() {
                    Ok(mime) => Some(mime.essence_str().to_string()),
                    Err(_) => Some(ct),
                }
            }
            _ => mime_guess::from_path(&self.name)
                .first()
                .map(|m| m.essence_str().to_string()),
        }
    }

    /// Reject anything that is not a PDF within the size limit.
    pub fn validate(&self, max_bytes: u64) -> Result<(), ConsoleError> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::invalid("name"));
        }
        match self.mime() {
            Some(mime) if mime == PDF_MIME => {}
            other => {
                return Err(ConsoleError::UnsupportedFileType(
                    other.unwrap_or_else(|| "unknown".to_string()),
                ))
            }
        }
        if self.size > max_bytes {
            return Err(ConsoleError::invalid("size"));
        }
        Ok(())
    }
}

/// Result of analysing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub page_count: u32,
    pub extracted: Vec<RiskConfig>,
}

pub type ProcessFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ProcessedDocument, ConsoleError>> + Send + 'a>>;

/// Turns a submitted document into a page count and extracted risk configs.
pub trait DocumentProcessor: Send + Sync {
    fn submit<'a>(&'a self, file: &'a FileRef) -> ProcessFuture<'a>;
}

/// Stand-in processor: waits, then reports a fixed analysis.
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub const PAGE_COUNT: u32 = 5;

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn extracted() -> Vec<RiskConfig> {
        vec![
            RiskConfig::auto("1", "Hate Speech", RiskSeverity::High),
            RiskConfig::auto("2", "Violence", RiskSeverity::Medium),
        ]
    }
}

impl DocumentProcessor for SimulatedProcessor {
    fn submit<'a>(&'a self, file: &'a FileRef) -> ProcessFuture<'a> {
        Box::pin(async move {
            tracing::debug!("Processing {} ({} bytes)", file.name, file.size);
            tokio::time::sleep(self.delay).await;
            Ok(ProcessedDocument {
                page_count: Self::PAGE_COUNT,
                extracted: Self::extracted(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    const TEN_MIB: u64 = 10 * 1024 * 1024;

    fn file(name: &str, size: u64, content_type: Option<&str>) -> FileRef {
        FileRef {
            name: name.to_string(),
            size,
            content_type: content_type.map(str::to_string),
        }
    }

    #[test]
    fn test_pdf_is_accepted() {
        assert_ok!(file("report.pdf", 3_000_000, Some("application/pdf")).validate(TEN_MIB));
        assert_ok!(file("report.pdf", 3_000_000, None).validate(TEN_MIB));
        assert_ok!(file("REPORT.PDF", 1, Some("")).validate(TEN_MIB));
    }

    #[test]
    fn test_content_type_parameters_are_ignored() {
        let declared = file("report.pdf", 10, Some("application/pdf; charset=binary"));
        assert_eq!(declared.mime().as_deref(), Some(PDF_MIME));
        assert_ok!(declared.validate(TEN_MIB));

        assert_ok!(file("report.pdf", 10, Some("Application/PDF")).validate(TEN_MIB));

        let text = file("report.pdf", 10, Some("text/plain; charset=utf-8"));
        let err = assert_err!(text.validate(TEN_MIB));
        assert_eq!(err, ConsoleError::UnsupportedFileType("text/plain".to_string()));

        let err = assert_err!(file("report.pdf", 10, Some("not a mime")).validate(TEN_MIB));
        assert_eq!(err, ConsoleError::UnsupportedFileType("not a mime".to_string()));
    }

    #[test]
    fn test_non_pdf_is_rejected() {
        let err = assert_err!(file("notes.txt", 10, None).validate(TEN_MIB));
        assert_eq!(err, ConsoleError::UnsupportedFileType("text/plain".to_string()));

        let err = assert_err!(file("report.pdf", 10, Some("image/png")).validate(TEN_MIB));
        assert!(matches!(err, ConsoleError::UnsupportedFileType(_)));

        let err = assert_err!(file("README", 10, None).validate(TEN_MIB));
        assert_eq!(err, ConsoleError::UnsupportedFileType("unknown".to_string()));
    }

    #[test]
    fn test_size_and_name_limits() {
        let err = assert_err!(file("big.pdf", TEN_MIB + 1, None).validate(TEN_MIB));
        assert_eq!(err, ConsoleError::ValidationFailed { field: "size" });

        let err = assert_err!(file("  ", 10, Some(PDF_MIME)).validate(TEN_MIB));
        assert_eq!(err, ConsoleError::ValidationFailed { field: "name" });
    }

    #[tokio::test]
    async fn test_simulated_processor_reports_fixed_analysis() {
        let processor = SimulatedProcessor::new(Duration::ZERO);
        let doc = processor
            .submit(&file("report.pdf", 3_000_000, None))
            .await
            .unwrap();
        assert_eq!(doc.page_count, 5);
        assert_eq!(doc.extracted.len(), 2);
        assert_eq!(doc.extracted[0].category, "Hate Speech");
        assert_eq!(doc.extracted[1].severity, RiskSeverity::Medium);
    }
}
