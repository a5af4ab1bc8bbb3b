//! Error taxonomy for document loading.
//!
//! Only loading can fail. Once a [`Document`](crate::parser::Document) is
//! built, navigation over it is total.

use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The locator does not have the shape a resolver accepts, or the
    /// source answered "not here". Drives fallback to the next resolver.
    #[error("cannot resolve the locator provided")]
    NotApplicable,

    /// The locator matched a resolver but fetching the content failed.
    #[error("failed to fetch {locator}: {source}")]
    FetchFailed {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// The fetched content could not be read as markdown.
    #[error("failed to parse document: {0}")]
    ParseFailed(#[from] FromUtf8Error),
}

impl Error {
    pub fn fetch_failed(locator: impl Into<String>, source: std::io::Error) -> Self {
        Error::FetchFailed {
            locator: locator.into(),
            source,
        }
    }

    /// Whether the chain should stop instead of trying the next resolver.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::NotApplicable)
    }
}

/// Convenience type alias for Results with [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
