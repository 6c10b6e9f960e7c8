//! web-sys adapters for the theme presenter and navigation anchors.

use crate::core::error::{SiteError, SiteResult};
use crate::core::nav::NavAnchor;
use crate::core::theme::{ThemeMode, ThemePresenter};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

/// Render a thrown JS value for error context.
pub(crate) fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Every node matching `selector`.
pub(crate) fn query_nodes(document: &Document, selector: &str) -> SiteResult<Vec<Node>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|err| SiteError::dom("query selector", selector, js_detail(&err)))?;
    Ok((0..list.length()).filter_map(|index| list.item(index)).collect())
}

/// Every element matching `selector`.
pub(crate) fn query_elements(document: &Document, selector: &str) -> SiteResult<Vec<Element>> {
    Ok(query_nodes(document, selector)?
        .into_iter()
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn body(document: &Document) -> SiteResult<HtmlElement> {
    document.body().ok_or(SiteError::DocumentUnavailable)
}

/// Presents the theme as a body class plus toggle-control glyphs.
#[derive(Clone, Debug)]
pub(crate) struct DomThemePresenter {
    document: Document,
    light_class: String,
    toggle_selector: String,
}

impl DomThemePresenter {
    pub(crate) fn new(document: Document, light_class: &str, toggle_selector: &str) -> Self {
        Self {
            document,
            light_class: light_class.to_string(),
            toggle_selector: toggle_selector.to_string(),
        }
    }
}

impl ThemePresenter for DomThemePresenter {
    fn is_light(&self) -> bool {
        body(&self.document).is_ok_and(|body| body.class_list().contains(&self.light_class))
    }

    fn present(&self, theme: ThemeMode) -> SiteResult<()> {
        let classes = body(&self.document)?.class_list();
        let updated = if theme.is_light() {
            classes.add_1(&self.light_class)
        } else {
            classes.remove_1(&self.light_class)
        };
        updated.map_err(|err| SiteError::dom("toggle body class", "body", js_detail(&err)))?;

        for toggle in query_elements(&self.document, &self.toggle_selector)? {
            toggle.set_text_content(Some(theme.glyph()));
            toggle
                .set_attribute("aria-pressed", theme.aria_pressed())
                .map_err(|err| {
                    SiteError::dom("set aria-pressed", self.toggle_selector.clone(), js_detail(&err))
                })?;
        }
        Ok(())
    }
}

/// A node matched by the navigation selector.
pub(crate) struct DomNavAnchor {
    node: Node,
    active_class: String,
}

impl DomNavAnchor {
    pub(crate) fn collect(
        document: &Document,
        selector: &str,
        active_class: &str,
    ) -> SiteResult<Vec<Self>> {
        Ok(query_nodes(document, selector)?
            .into_iter()
            .map(|node| Self {
                node,
                active_class: active_class.to_string(),
            })
            .collect())
    }

    fn element(&self) -> SiteResult<&Element> {
        self.node
            .dyn_ref::<Element>()
            .ok_or_else(|| SiteError::dom("read anchor", self.node.node_name(), "not an element"))
    }
}

impl NavAnchor for DomNavAnchor {
    fn href(&self) -> SiteResult<Option<String>> {
        Ok(self.element()?.get_attribute("href"))
    }

    fn set_active(&self, active: bool) -> SiteResult<()> {
        let classes = self.element()?.class_list();
        let updated = if active {
            classes.add_1(&self.active_class)
        } else {
            classes.remove_1(&self.active_class)
        };
        updated.map_err(|err| SiteError::dom("toggle active class", "a", js_detail(&err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nav::highlight;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|window| window.document()).unwrap()
    }

    fn append(document: &Document, tag: &str, class: &str) -> Element {
        let element = document.create_element(tag).unwrap();
        element.set_class_name(class);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn presenter_updates_body_and_every_toggle() {
        let document = document();
        let toggles = [
            append(&document, "button", "swf-test-toggle"),
            append(&document, "button", "swf-test-toggle"),
        ];
        let presenter =
            DomThemePresenter::new(document.clone(), "swf-test-light", ".swf-test-toggle");

        presenter.present(ThemeMode::Light).unwrap();
        assert!(presenter.is_light());
        for toggle in &toggles {
            assert_eq!(toggle.text_content().as_deref(), Some(ThemeMode::Light.glyph()));
            assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("true"));
        }

        presenter.present(ThemeMode::Dark).unwrap();
        assert!(!presenter.is_light());
        for toggle in &toggles {
            assert_eq!(toggle.text_content().as_deref(), Some(ThemeMode::Dark.glyph()));
            assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("false"));
            toggle.remove();
        }
    }

    #[wasm_bindgen_test]
    fn nav_anchors_follow_the_current_page() {
        let document = document();
        let nav = append(&document, "nav", "swf-test-nav");
        nav.set_inner_html(
            r#"<a href="index.html" class="active">Home</a><a href="about.html">About</a><a>Top</a>"#,
        );

        let anchors = DomNavAnchor::collect(&document, ".swf-test-nav a", "active").unwrap();
        let outcome = highlight(&anchors, "about.html");
        assert_eq!((outcome.active, outcome.inactive), (1, 2));

        let active: Vec<_> = query_elements(&document, ".swf-test-nav a.active")
            .unwrap()
            .iter()
            .filter_map(|anchor| anchor.get_attribute("href"))
            .collect();
        assert_eq!(active, ["about.html"]);
        nav.remove();
    }
}
