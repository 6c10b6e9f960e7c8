//! Page-level configuration: the DOM contract, storage key, and messaging defaults.
//!
//! # Design
//! - Every field has a default, so a page without a config block behaves exactly
//!   like the stock markup contract.
//! - A page may override any subset through a JSON block; unknown keys are rejected
//!   so typos surface in the console instead of silently doing nothing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::core::error::{SiteError, SiteResult};
use crate::core::messaging::{DEFAULT_MESSAGING_BASE, DEFAULT_PHONE_NUMBER, DEFAULT_PLACEHOLDER};

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "swf-config";

/// Enhancer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Storage key the theme is persisted under.
    pub storage_key: String,
    /// Id of the element receiving the current year.
    pub year_element_id: String,
    /// Selector matching navigation anchors.
    pub nav_anchor_selector: String,
    /// Filename assumed when the path ends in `/`.
    pub index_page: String,
    /// Class marking the active navigation anchor.
    pub active_class: String,
    /// Class on the body marking the light theme.
    pub light_class: String,
    /// Selector matching theme toggle controls.
    pub theme_toggle_selector: String,
    /// Ids of elements that open the messaging link.
    pub messaging_button_ids: Vec<String>,
    /// Id of the name input.
    pub name_field_id: String,
    /// Id of the email input.
    pub email_field_id: String,
    /// Id of the message input.
    pub message_field_id: String,
    /// Message sent when the message input is empty.
    pub placeholder_message: String,
    /// Phone number used when the page does not set an override.
    pub default_phone_number: String,
    /// Messaging service base URL.
    pub messaging_base_url: String,
    /// Window property holding the page's phone number override.
    pub number_override_global: String,
    /// Window property the theme API object is installed under.
    pub api_global: String,
    /// Maximum console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: "swf-theme".to_string(),
            year_element_id: "yr".to_string(),
            nav_anchor_selector: "header.site-header .nav a".to_string(),
            index_page: "index.html".to_string(),
            active_class: "active".to_string(),
            light_class: "light".to_string(),
            theme_toggle_selector: ".theme-toggle".to_string(),
            messaging_button_ids: ["waBtn", "waButton", "waFloat", "waDirect"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            name_field_id: "name".to_string(),
            email_field_id: "email".to_string(),
            message_field_id: "message".to_string(),
            placeholder_message: DEFAULT_PLACEHOLDER.to_string(),
            default_phone_number: DEFAULT_PHONE_NUMBER.to_string(),
            messaging_base_url: DEFAULT_MESSAGING_BASE.to_string(),
            number_override_global: "SWF_WA_NUMBER".to_string(),
            api_global: "SWF".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl PageConfig {
    /// Parse and validate a JSON override block.
    ///
    /// # Errors
    /// Returns [`SiteError::Config`] for malformed JSON or unknown keys and
    /// [`SiteError::InvalidConfig`] when a value fails validation.
    pub fn from_json(raw: &str) -> SiteResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| SiteError::Config { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Render as the pretty-printed JSON a page's config block would hold.
    ///
    /// # Errors
    /// Returns [`SiteError::Config`] if serialisation fails.
    pub fn to_json_pretty(&self) -> SiteResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| SiteError::Config { source })
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    /// Returns [`SiteError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> SiteResult<()> {
        let required = [
            ("storage_key", &self.storage_key),
            ("year_element_id", &self.year_element_id),
            ("nav_anchor_selector", &self.nav_anchor_selector),
            ("index_page", &self.index_page),
            ("active_class", &self.active_class),
            ("light_class", &self.light_class),
            ("theme_toggle_selector", &self.theme_toggle_selector),
            ("name_field_id", &self.name_field_id),
            ("email_field_id", &self.email_field_id),
            ("message_field_id", &self.message_field_id),
            ("number_override_global", &self.number_override_global),
            ("api_global", &self.api_global),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(invalid(*field, "must not be empty", None));
        }
        for class in [
            ("active_class", &self.active_class),
            ("light_class", &self.light_class),
        ] {
            if class.1.chars().any(char::is_whitespace) {
                return Err(invalid(class.0, "must be a single class name", Some(class.1)));
            }
        }
        if let Some(id) = self.messaging_button_ids.iter().find(|id| id.trim().is_empty()) {
            return Err(invalid("messaging_button_ids", "must not contain empty ids", Some(id)));
        }
        if self.default_phone_number.is_empty()
            || !self.default_phone_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid(
                "default_phone_number",
                "must be digits only",
                Some(&self.default_phone_number),
            ));
        }
        if !self.messaging_base_url.starts_with("https://") {
            return Err(invalid(
                "messaging_base_url",
                "must be an https url",
                Some(&self.messaging_base_url),
            ));
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parsed console log level.
    ///
    /// # Errors
    /// Returns [`SiteError::InvalidConfig`] for an unknown level name.
    pub fn log_filter(&self) -> SiteResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| invalid("log_level", "unknown log level", Some(&self.log_level)))
    }
}

fn invalid(field: &'static str, reason: &'static str, value: Option<&str>) -> SiteError {
    SiteError::InvalidConfig {
        field,
        reason,
        value: value.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(raw: &str) -> Option<&'static str> {
        match PageConfig::from_json(raw) {
            Err(SiteError::InvalidConfig { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn defaults_match_markup_contract() {
        let config = PageConfig::default();
        assert_eq!(config.storage_key, "swf-theme");
        assert_eq!(config.year_element_id, "yr");
        assert_eq!(config.nav_anchor_selector, "header.site-header .nav a");
        assert_eq!(config.theme_toggle_selector, ".theme-toggle");
        assert_eq!(
            config.messaging_button_ids,
            ["waBtn", "waButton", "waFloat", "waDirect"]
        );
        assert_eq!(config.default_phone_number, "94701421968");
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter().ok(), Some(LevelFilter::WARN));
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config = PageConfig::from_json(
            r#"{"default_phone_number": "15550001111", "log_level": "debug"}"#,
        )
        .unwrap_or_default();
        assert_eq!(config.default_phone_number, "15550001111");
        assert_eq!(config.log_filter().ok(), Some(LevelFilter::DEBUG));
        assert_eq!(config.storage_key, "swf-theme");
        assert_eq!(config.messaging_button_ids.len(), 4);
    }

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(PageConfig::from_json("{}").ok(), Some(PageConfig::default()));
    }

    #[test]
    fn unknown_keys_and_bad_json_are_parse_errors() {
        assert!(matches!(
            PageConfig::from_json(r#"{"storage_kye": "x"}"#),
            Err(SiteError::Config { .. })
        ));
        assert!(matches!(
            PageConfig::from_json("not json"),
            Err(SiteError::Config { .. })
        ));
    }

    #[test]
    fn invalid_values_name_their_field() {
        assert_eq!(invalid_field(r#"{"storage_key": " "}"#), Some("storage_key"));
        assert_eq!(
            invalid_field(r#"{"light_class": "light mode"}"#),
            Some("light_class")
        );
        assert_eq!(
            invalid_field(r#"{"messaging_button_ids": ["waBtn", ""]}"#),
            Some("messaging_button_ids")
        );
        assert_eq!(
            invalid_field(r#"{"default_phone_number": "+94 70"}"#),
            Some("default_phone_number")
        );
        assert_eq!(
            invalid_field(r#"{"messaging_base_url": "http://wa.me"}"#),
            Some("messaging_base_url")
        );
        assert_eq!(invalid_field(r#"{"log_level": "loud"}"#), Some("log_level"));
    }

    #[test]
    fn rendered_block_reads_back_unchanged() {
        let config = PageConfig {
            light_class: "day".into(),
            messaging_button_ids: vec!["chat".into()],
            ..PageConfig::default()
        };
        let rendered = config.to_json_pretty().unwrap_or_default();
        assert!(rendered.contains("\"light_class\": \"day\""));
        assert_eq!(PageConfig::from_json(&rendered).ok(), Some(config));
    }

    #[test]
    fn no_messaging_buttons_is_allowed() {
        let config = PageConfig::from_json(r#"{"messaging_button_ids": []}"#);
        assert!(config.is_ok_and(|c| c.messaging_button_ids.is_empty()));
    }
}
