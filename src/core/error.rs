use thiserror::Error;

/// Failures a decorative feature can hit. None of them reach the visitor:
/// the feature that produced one degrades to a no-op and the error is logged.
#[derive(Error, Debug)]
pub enum SiteError {
    /// A selector or id the feature binds to is not in the document.
    #[error("missing DOM target: {0}")]
    MissingTarget(String),

    /// The embedded content records could not be parsed.
    #[error("invalid site content: {0}")]
    Content(#[from] serde_json::Error),

    /// Audio output is unavailable or a node could not be created.
    #[error("audio unavailable: {0}")]
    Audio(String),

    /// A DOM call was rejected by the browser.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type SiteResult<T> = Result<T, SiteError>;
