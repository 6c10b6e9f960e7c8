//! Light/dark theme model and the service that resolves, applies, and toggles it.
//!
//! # Design
//! - Dark is the baseline: it is what the page shows with no marker class.
//! - Initialisation trusts storage; toggling trusts what is currently presented.
//!   Storage is only written by an explicit toggle.
//! - Browser access goes through three small ports so the rules here can be
//!   exercised without a document.

use crate::core::error::SiteResult;
use tracing::{debug, warn};

/// Light or dark theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    /// Light theme mode (explicit marker class on the body).
    Light,
    /// Dark theme mode (no marker class).
    Dark,
}

impl ThemeMode {
    /// String identifier persisted in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a stored or caller-supplied value. Only `"light"` selects the
    /// light theme; every other string falls back to dark.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::Light.as_str() {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Theme matching a "light marker present" flag.
    #[must_use]
    pub const fn from_light(is_light: bool) -> Self {
        if is_light { Self::Light } else { Self::Dark }
    }

    /// The other theme.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is the light theme.
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Icon shown on toggle controls: sun for light, moon for dark.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Light => "\u{2600}\u{fe0f}",
            Self::Dark => "\u{1f319}",
        }
    }

    /// Value for the toggle controls' `aria-pressed` attribute.
    #[must_use]
    pub const fn aria_pressed(self) -> &'static str {
        if self.is_light() { "true" } else { "false" }
    }
}

/// Durable, origin-scoped key-value storage.
pub trait PersistentKeyValueStore {
    /// Read a value. Missing keys and unreadable storage both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns a storage error when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> SiteResult<()>;
}

/// Environment colour-scheme signal.
pub trait SystemPreferenceReader {
    /// `Some(true)` when the environment prefers a light scheme, `Some(false)`
    /// when it reports otherwise, `None` when no signal is available.
    fn prefers_light(&self) -> Option<bool>;
}

/// Presentation of the theme on the page.
pub trait ThemePresenter {
    /// Whether the light marker is currently presented.
    fn is_light(&self) -> bool;

    /// Present `theme` on the body marker and every toggle control.
    ///
    /// # Errors
    /// Returns a DOM error when the presentation could not be updated.
    fn present(&self, theme: ThemeMode) -> SiteResult<()>;
}

/// Where an initial theme came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    /// A non-empty value was found in storage.
    Stored,
    /// Storage was empty; the environment preference decided.
    SystemPreference,
    /// Storage was empty and no environment signal was available.
    Fallback,
}

/// Owns the current theme and the ports used to resolve, present, and persist it.
#[derive(Debug)]
pub struct ThemeService<S, R, P> {
    store: S,
    preference: R,
    presenter: P,
    storage_key: String,
    current: Option<ThemeMode>,
}

impl<S, R, P> ThemeService<S, R, P>
where
    S: PersistentKeyValueStore,
    R: SystemPreferenceReader,
    P: ThemePresenter,
{
    /// Build a service persisting under `storage_key`.
    pub fn new(store: S, preference: R, presenter: P, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            preference,
            presenter,
            storage_key: storage_key.into(),
            current: None,
        }
    }

    /// Last theme applied through this service.
    #[must_use]
    pub const fn current(&self) -> Option<ThemeMode> {
        self.current
    }

    /// Decide the initial theme without touching the page.
    #[must_use]
    pub fn resolve_initial(&self) -> (ThemeMode, ThemeSource) {
        if let Some(saved) = self.store.get(&self.storage_key).filter(|value| !value.is_empty()) {
            return (ThemeMode::parse(&saved), ThemeSource::Stored);
        }
        match self.preference.prefers_light() {
            Some(prefers_light) => (ThemeMode::from_light(prefers_light), ThemeSource::SystemPreference),
            None => (ThemeMode::Dark, ThemeSource::Fallback),
        }
    }

    /// Present `theme` and record it as current. Does not persist.
    ///
    /// # Errors
    /// Propagates presentation failures; the current value is left unchanged.
    pub fn apply(&mut self, theme: ThemeMode) -> SiteResult<()> {
        self.presenter.present(theme)?;
        self.current = Some(theme);
        debug!(theme = theme.as_str(), "theme applied");
        Ok(())
    }

    /// Resolve the initial theme and apply it. Storage is not written.
    ///
    /// # Errors
    /// Propagates presentation failures.
    pub fn init(&mut self) -> SiteResult<ThemeMode> {
        let (theme, source) = self.resolve_initial();
        debug!(theme = theme.as_str(), ?source, "initial theme resolved");
        self.apply(theme)?;
        Ok(theme)
    }

    /// Flip the presented theme and persist the new value.
    ///
    /// A failed storage write is logged; the new theme stays applied.
    ///
    /// # Errors
    /// Propagates presentation failures, in which case nothing is persisted.
    pub fn toggle(&mut self) -> SiteResult<ThemeMode> {
        let next = ThemeMode::from_light(self.presenter.is_light()).opposite();
        self.apply(next)?;
        if let Err(err) = self.store.set(&self.storage_key, next.as_str()) {
            warn!(error = %err, key = %self.storage_key, "theme persistence failed");
        }
        Ok(next)
    }
}
