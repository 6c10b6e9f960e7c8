//! Persistence and environment helpers for the enhancer.

use crate::app::dom::js_detail;
use crate::core::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::core::error::{SiteError, SiteResult};
use crate::core::messaging::override_from_number;
use crate::core::theme::{PersistentKeyValueStore, SystemPreferenceReader};
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{Document, MediaQueryList, Storage, Window};

const LIGHT_SCHEME_QUERY: &str = "(prefers-color-scheme: light)";

/// Browser local storage. Values are stored as raw strings so pages that
/// already hold a plain `light`/`dark` value keep working. Storage can be
/// disabled by the browser, in which case reads miss and writes fail.
#[derive(Clone, Debug)]
pub(crate) struct LocalThemeStore {
    storage: Option<Storage>,
}

impl LocalThemeStore {
    pub(crate) fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PersistentKeyValueStore for LocalThemeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| SiteError::storage("set", key, "local storage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|err| SiteError::storage("set", key, js_detail(&err)))
    }
}

/// `prefers-color-scheme` media query.
#[derive(Clone, Debug)]
pub(crate) struct MediaPreference {
    window: Window,
}

impl MediaPreference {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

impl SystemPreferenceReader for MediaPreference {
    fn prefers_light(&self) -> Option<bool> {
        let media: MediaQueryList = self.window.match_media(LIGHT_SCHEME_QUERY).ok()??;
        Some(media.matches())
    }
}

/// Page override for the messaging number. Strings are used as given; numbers
/// go through [`override_from_number`]. Other values are ignored.
pub(crate) fn number_override(window: &Window, global: &str) -> Option<String> {
    let value = Reflect::get(window, &JsValue::from_str(global)).ok()?;
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    value.as_f64().and_then(override_from_number)
}

/// Load the page configuration block, falling back to defaults.
///
/// The parse error is returned alongside the defaults so it can be logged
/// once logging is configured.
pub(crate) fn load_page_config(document: &Document) -> (PageConfig, Option<SiteError>) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());
    match raw.as_deref().map(PageConfig::from_json) {
        None => (PageConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (PageConfig::default(), Some(err)),
    }
}
