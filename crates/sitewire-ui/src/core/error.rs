//! # Design
//!
//! - Constant-message errors for the page enhancer; context lives in fields.
//! - Missing optional elements are never errors. These variants describe
//!   browser calls that threw or configuration that could not be used.

use thiserror::Error;

/// Result type for page enhancement operations.
pub type SiteResult<T> = Result<T, SiteError>;

/// Errors produced while enhancing the page.
#[derive(Debug, Error)]
pub enum SiteError {
    /// No global `window` object (not running in a browser context).
    #[error("browser window unavailable")]
    WindowUnavailable,
    /// The window has no document or the document has no body.
    #[error("document unavailable")]
    DocumentUnavailable,
    /// A DOM call threw.
    #[error("dom operation failed")]
    Dom {
        /// Operation that was attempted.
        operation: &'static str,
        /// Selector, id, or element description the operation targeted.
        target: String,
        /// Rendered exception value reported by the browser.
        detail: String,
    },
    /// Browser storage access failed.
    #[error("storage operation failed")]
    Storage {
        /// Operation that was attempted.
        operation: &'static str,
        /// Storage key involved.
        key: String,
        /// Rendered exception value reported by the browser.
        detail: String,
    },
    /// The page configuration block is not valid JSON for [`PageConfig`].
    ///
    /// [`PageConfig`]: crate::core::config::PageConfig
    #[error("page config parse failed")]
    Config {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The page configuration parsed but holds an unusable value.
    #[error("page config invalid")]
    InvalidConfig {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl SiteError {
    /// Build a [`SiteError::Dom`] from an operation, target, and rendered detail.
    #[must_use]
    pub fn dom(operation: &'static str, target: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Dom {
            operation,
            target: target.into(),
            detail: detail.into(),
        }
    }

    /// Build a [`SiteError::Storage`] from an operation, key, and rendered detail.
    #[must_use]
    pub fn storage(operation: &'static str, key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Storage {
            operation,
            key: key.into(),
            detail: detail.into(),
        }
    }

    /// Operation name carried by DOM and storage failures.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Dom { operation, .. } | Self::Storage { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
