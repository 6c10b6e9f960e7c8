//! Bookkeeping that keeps handler wiring idempotent across repeated initialisation.
//!
//! Each wired element carries a space-separated list of concerns in
//! [`WIRED_ATTRIBUTE`]. Wiring a concern that is already listed is skipped.

/// Attribute recording which handlers an element already has.
pub const WIRED_ATTRIBUTE: &str = "data-swf-wired";

/// Handler families attached by the enhancer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WiredConcern {
    /// Theme toggle click handler.
    ThemeToggle,
    /// Messaging link click handler.
    Messaging,
}

impl WiredConcern {
    /// Token stored in [`WIRED_ATTRIBUTE`].
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::ThemeToggle => "theme",
            Self::Messaging => "messaging",
        }
    }
}

/// Return the new attribute value when `concern` still needs wiring, or
/// `None` when `existing` already lists it.
#[must_use]
pub fn claim(existing: Option<&str>, concern: WiredConcern) -> Option<String> {
    let token = concern.token();
    let current = existing.unwrap_or_default();
    if current.split_whitespace().any(|t| t == token) {
        return None;
    }
    let mut next = current.trim().to_string();
    if !next.is_empty() {
        next.push(' ');
    }
    next.push_str(token);
    Some(next)
}
