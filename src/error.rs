use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Please enter a valid API key")]
    EmptyCredential,
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read PDF: {0}")]
    Pdf(String),
    #[error("Invalid page range {start}-{end}: pages start at 1 and the start page must not exceed the end page")]
    InvalidPageRange { start: u32, end: u32 },
    #[error("Page {page} is out of range (document has {page_count} pages)")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("AI request failed: {0}")]
    Remote(String),
    #[error("The model did not return any questions")]
    NoQuestions,
    #[error("AI worker is not running")]
    WorkerUnavailable,
}

impl From<lopdf::Error> for QuizError {
    fn from(e: lopdf::Error) -> Self {
        QuizError::Pdf(e.to_string())
    }
}
