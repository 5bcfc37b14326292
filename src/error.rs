use thiserror::Error;

/// Failures that abort an analysis. Everything else is reported through
/// [`crate::model::Diagnostic`]s.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid DOCX archive: {0}")]
    InvalidArchive(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single image or WordArt element was left out of the summary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SkipReason {
    #[error("{0} has no relationship id")]
    MissingRelationshipId(&'static str),

    #[error("v:textpath has no string attribute")]
    MissingTextPathString,
}
