//! Active navigation link highlighting.
//!
//! Anchors are compared by their raw `href` attribute against the current
//! page's filename. Anchors that cannot be read or updated are skipped.

use crate::core::error::SiteResult;

/// Last segment of a URL path, or `index_page` when that segment is empty.
#[must_use]
pub fn page_filename(pathname: &str, index_page: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => index_page.to_string(),
    }
}

/// Whether an anchor with `href` points at `filename`. Anchors without an
/// `href` attribute never match.
#[must_use]
pub fn is_active(href: Option<&str>, filename: &str) -> bool {
    href == Some(filename)
}

/// A navigation anchor as seen by the highlighter.
pub trait NavAnchor {
    /// Read the raw `href` attribute. `Ok(None)` means the attribute is absent.
    ///
    /// # Errors
    /// Returns an error when the node cannot be inspected.
    fn href(&self) -> SiteResult<Option<String>>;

    /// Add or remove the active marker.
    ///
    /// # Errors
    /// Returns an error when the marker could not be changed.
    fn set_active(&self, active: bool) -> SiteResult<()>;
}

/// Tally of a highlighting pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightOutcome {
    /// Anchors now carrying the active marker.
    pub active: usize,
    /// Anchors with the marker cleared.
    pub inactive: usize,
    /// Anchors left untouched because a read or write failed.
    pub skipped: usize,
}

/// Mark exactly the anchors whose `href` equals `filename`.
pub fn highlight<A: NavAnchor>(anchors: &[A], filename: &str) -> HighlightOutcome {
    let mut outcome = HighlightOutcome::default();
    for anchor in anchors {
        let Ok(href) = anchor.href() else {
            outcome.skipped += 1;
            continue;
        };
        let active = is_active(href.as_deref(), filename);
        match anchor.set_active(active) {
            Ok(()) if active => outcome.active += 1,
            Ok(()) => outcome.inactive += 1,
            Err(_) => outcome.skipped += 1,
        }
    }
    outcome
}
