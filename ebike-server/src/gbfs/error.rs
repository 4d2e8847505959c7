//! GBFS client error types.

/// Errors from fetching or interpreting the GBFS feeds.
///
/// A fetch cycle treats every variant the same way: log it and show the
/// generic error text. The variants exist so the log line says which of
/// the three documents failed, and how.
#[derive(Debug, thiserror::Error)]
pub enum GbfsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse a document's JSON
    #[error("JSON parse error in {document}: {message}")]
    Json {
        document: &'static str,
        message: String,
    },

    /// A feed returned a non-success status code
    #[error("API error {status} fetching {document}: {message}")]
    Api {
        document: &'static str,
        status: u16,
        message: String,
    },

    /// The discovery document has no block for the configured language
    #[error("discovery document has no {language:?} language block")]
    MissingLanguage { language: String },

    /// The language block lists no feed with the expected name
    #[error("discovery document lists no {name:?} feed")]
    MissingFeed { name: &'static str },
}
