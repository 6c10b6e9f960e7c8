//! Prefilled messaging links built from the optional contact form fields.

use std::fmt;

/// Message used when the message field is missing or empty.
pub const DEFAULT_PLACEHOLDER: &str = "Hello! I would like more info.";

/// Phone number used when the page does not override it.
pub const DEFAULT_PHONE_NUMBER: &str = "94701421968";

/// Base URL of the messaging service.
pub const DEFAULT_MESSAGING_BASE: &str = "https://wa.me";

/// Contact form values read at click time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    /// Sender name, empty when not provided.
    pub name: String,
    /// Sender email, empty when not provided. Not validated.
    pub email: String,
    /// Message text; never empty after [`ContactFields::from_inputs`].
    pub message: String,
}

impl ContactFields {
    /// Normalise raw field reads. Missing fields become empty strings and an
    /// empty message is replaced by `placeholder`.
    #[must_use]
    pub fn from_inputs(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
        placeholder: &str,
    ) -> Self {
        let message = message
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| placeholder.to_string());
        Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message,
        }
    }

    /// Plain-text message body sent to the messaging service.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage: {}",
            self.name, self.email, self.message
        )
    }
}

/// Phone number the outbound link is addressed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagingTarget(String);

impl MessagingTarget {
    /// Prefer a non-empty page override, else `default_number`.
    #[must_use]
    pub fn resolve(page_override: Option<&str>, default_number: &str) -> Self {
        let number = page_override
            .filter(|value| !value.is_empty())
            .unwrap_or(default_number);
        Self(number.to_string())
    }

    /// Number as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render a numeric page override the way a script's `String(value)` would.
///
/// Zero and `NaN` are falsy on the page and yield `None`, so the default
/// number applies. Integral values print without a fraction; others keep it.
/// Exponent notation (magnitudes of `1e21` and above, or below `1e-6`) is not
/// reproduced.
#[must_use]
pub fn override_from_number(value: f64) -> Option<String> {
    if value == 0.0 || value.is_nan() {
        return None;
    }
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return Some(format!("{sign}Infinity"));
    }
    if value.fract() == 0.0 {
        return Some(format!("{value:.0}"));
    }
    Some(value.to_string())
}

impl fmt::Display for MessagingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build `<base>/<number>?text=<percent-encoded body>`.
///
/// The number is inserted as given; only the body is encoded.
#[must_use]
pub fn build_url(base: &str, target: &MessagingTarget, fields: &ContactFields) -> String {
    format!(
        "{}/{}?text={}",
        base.trim_end_matches('/'),
        target.as_str(),
        urlencoding::encode(&fields.body())
    )
}
