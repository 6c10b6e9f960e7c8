//! Click handler wiring for theme toggles and messaging links.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Window};

use crate::app::SharedTheme;
use crate::app::dom::{js_detail, query_elements};
use crate::core::config::PageConfig;
use crate::core::error::{SiteError, SiteResult};
use crate::core::messaging::{ContactFields, MessagingTarget, build_url};
use crate::core::wiring::{WIRED_ATTRIBUTE, WiredConcern, claim};

/// Record `concern` on `element`. Returns `false` when it was already wired.
fn claim_element(element: &Element, concern: WiredConcern) -> SiteResult<bool> {
    let existing = element.get_attribute(WIRED_ATTRIBUTE);
    let Some(next) = claim(existing.as_deref(), concern) else {
        return Ok(false);
    };
    element
        .set_attribute(WIRED_ATTRIBUTE, &next)
        .map_err(|err| SiteError::dom("mark wired", concern.token(), js_detail(&err)))?;
    Ok(true)
}

/// Attach the toggle handler to every theme toggle control not yet wired.
pub(crate) fn wire_theme_toggles(
    document: &Document,
    selector: &str,
    theme: &SharedTheme,
) -> SiteResult<usize> {
    let mut wired = 0;
    for control in query_elements(document, selector)? {
        if !claim_element(&control, WiredConcern::ThemeToggle)? {
            continue;
        }
        let theme = Rc::clone(theme);
        EventListener::new(&control, "click", move |_event| {
            let Ok(mut service) = theme.try_borrow_mut() else {
                warn!("theme toggle re-entered while busy");
                return;
            };
            if let Err(err) = service.toggle() {
                warn!(error = %err, ?err, "theme toggle failed");
            }
        })
        .forget();
        wired += 1;
    }
    Ok(wired)
}

/// Field ids, placeholder, and destination shared by every messaging control.
struct MessagingLink {
    window: Window,
    document: Document,
    name_field_id: String,
    email_field_id: String,
    message_field_id: String,
    placeholder: String,
    base_url: String,
    target: MessagingTarget,
}

impl MessagingLink {
    fn field_value(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        element.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }

    fn url(&self) -> String {
        let fields = ContactFields::from_inputs(
            self.field_value(&self.name_field_id),
            self.field_value(&self.email_field_id),
            self.field_value(&self.message_field_id),
            &self.placeholder,
        );
        build_url(&self.base_url, &self.target, &fields)
    }

    fn open(&self) {
        let url = self.url();
        match self.window.open_with_url_and_target(&url, "_blank") {
            Ok(Some(_)) => debug!("messaging link opened"),
            Ok(None) => debug!("messaging link blocked by the browser"),
            Err(err) => debug!(detail = %js_detail(&err), "messaging link open failed"),
        }
    }
}

/// Attach the messaging handler to each configured control present on the page.
pub(crate) fn wire_messaging(
    window: &Window,
    document: &Document,
    config: &PageConfig,
    page_override: Option<&str>,
) -> SiteResult<usize> {
    let link = Rc::new(MessagingLink {
        window: window.clone(),
        document: document.clone(),
        name_field_id: config.name_field_id.clone(),
        email_field_id: config.email_field_id.clone(),
        message_field_id: config.message_field_id.clone(),
        placeholder: config.placeholder_message.clone(),
        base_url: config.messaging_base_url.clone(),
        target: MessagingTarget::resolve(page_override, &config.default_phone_number),
    });
    debug!(target_number = %link.target, "messaging target resolved");

    let mut wired = 0;
    for id in &config.messaging_button_ids {
        let Some(control) = document.get_element_by_id(id) else {
            continue;
        };
        if !claim_element(&control, WiredConcern::Messaging)? {
            continue;
        }
        let link = Rc::clone(&link);
        EventListener::new_with_options(
            &control,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                link.open();
            },
        )
        .forget();
        wired += 1;
    }
    Ok(wired)
}
