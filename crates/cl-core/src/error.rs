//! Error types
//!
//! `Error`'s `Display` output is what the user sees in the popup toast.

/// Failure reported by a host platform call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host refused access to this page (privileged or restricted URL).
    #[error("Restricted page: {0}")]
    Restricted(String),
    /// Any other platform failure.
    #[error("{0}")]
    Failed(String),
}

/// Error returned by core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("No active tab found.")]
    NoActiveTab,
    #[error("Cannot scrape links from this page.")]
    ScrapeDenied,
    #[error("Cannot copy from this page.")]
    CopyDenied,
    #[error("Could not copy to clipboard.")]
    CopyFailed,
    #[error("No URLs to copy.")]
    NoUrlsToCopy,
    #[error("No URLs provided.")]
    NoUrlsProvided,
    #[error("No valid URLs to copy.")]
    NoValidUrls,
    #[error("Could not open any URLs.")]
    NoTabsOpened,
    #[error("{0}")]
    Host(String),
}

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Error::Host(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
