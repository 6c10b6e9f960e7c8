//! End-to-end page flows against an in-memory page.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use sitewire_ui::core::config::PageConfig;
use sitewire_ui::core::error::SiteResult;
use sitewire_ui::core::messaging::{ContactFields, MessagingTarget, build_url};
use sitewire_ui::core::nav::{NavAnchor, highlight, page_filename};
use sitewire_ui::core::theme::{
    PersistentKeyValueStore, SystemPreferenceReader, ThemeMode, ThemePresenter, ThemeService,
};
use sitewire_ui::core::wiring::{WiredConcern, claim};

/// Storage shared between page loads of the same origin.
#[derive(Clone, Default)]
struct OriginStorage(Rc<RefCell<HashMap<String, String>>>);

impl PersistentKeyValueStore for OriginStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SiteResult<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct Scheme(Option<bool>);

impl SystemPreferenceReader for Scheme {
    fn prefers_light(&self) -> Option<bool> {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Toggle {
    text: String,
    pressed: String,
}

/// Body classes plus a handful of toggle controls.
#[derive(Clone)]
struct Page {
    body_classes: Rc<RefCell<BTreeSet<String>>>,
    toggles: Rc<RefCell<Vec<Toggle>>>,
    light_class: String,
}

impl Page {
    fn new(toggle_count: usize) -> Self {
        Self {
            body_classes: Rc::default(),
            toggles: Rc::new(RefCell::new(vec![
                Toggle {
                    text: String::new(),
                    pressed: String::new(),
                };
                toggle_count
            ])),
            light_class: PageConfig::default().light_class,
        }
    }

    fn toggles_agree_with(&self, theme: ThemeMode) -> bool {
        self.toggles
            .borrow()
            .iter()
            .all(|t| t.text == theme.glyph() && t.pressed == theme.aria_pressed())
    }
}

impl ThemePresenter for Page {
    fn is_light(&self) -> bool {
        self.body_classes.borrow().contains(&self.light_class)
    }

    fn present(&self, theme: ThemeMode) -> SiteResult<()> {
        let mut classes = self.body_classes.borrow_mut();
        if theme.is_light() {
            classes.insert(self.light_class.clone());
        } else {
            classes.remove(&self.light_class);
        }
        for toggle in self.toggles.borrow_mut().iter_mut() {
            toggle.text = theme.glyph().to_string();
            toggle.pressed = theme.aria_pressed().to_string();
        }
        Ok(())
    }
}

fn load(
    storage: &OriginStorage,
    scheme: Option<bool>,
    page: &Page,
) -> ThemeService<OriginStorage, Scheme, Page> {
    let config = PageConfig::default();
    ThemeService::new(storage.clone(), Scheme(scheme), page.clone(), config.storage_key)
}

#[test]
fn toggled_theme_survives_reload() {
    let storage = OriginStorage::default();

    let first_page = Page::new(2);
    let mut theme = load(&storage, Some(false), &first_page);
    assert_eq!(theme.init().ok(), Some(ThemeMode::Dark));
    assert!(first_page.toggles_agree_with(ThemeMode::Dark));
    assert_eq!(theme.toggle().ok(), Some(ThemeMode::Light));
    assert!(first_page.toggles_agree_with(ThemeMode::Light));

    let second_page = Page::new(3);
    let mut theme = load(&storage, Some(false), &second_page);
    assert_eq!(theme.init().ok(), Some(ThemeMode::Light));
    assert!(second_page.is_light());
    assert!(second_page.toggles_agree_with(ThemeMode::Light));
}

#[test]
fn explicit_set_does_not_persist() {
    let storage = OriginStorage::default();
    let page = Page::new(1);
    let mut theme = load(&storage, None, &page);
    theme.init().ok();
    assert!(theme.apply(ThemeMode::parse("light")).is_ok());
    assert!(page.is_light());
    assert!(storage.get("swf-theme").is_none());
}

#[test]
fn toggle_follows_presentation_not_storage() {
    let storage = OriginStorage::default();
    storage.set("swf-theme", "light").ok();
    let page = Page::new(1);
    let mut theme = load(&storage, None, &page);
    theme.init().ok();

    // Another script flips the body class directly; the next toggle starts from what is shown.
    page.body_classes.borrow_mut().clear();
    assert_eq!(theme.toggle().ok(), Some(ThemeMode::Light));
    assert_eq!(storage.get("swf-theme").as_deref(), Some("light"));
}

struct Anchor {
    href: &'static str,
    active: Cell<bool>,
}

impl NavAnchor for Anchor {
    fn href(&self) -> SiteResult<Option<String>> {
        Ok(Some(self.href.to_string()))
    }

    fn set_active(&self, active: bool) -> SiteResult<()> {
        self.active.set(active);
        Ok(())
    }
}

#[test]
fn root_path_highlights_index_link() {
    let config = PageConfig::default();
    let anchors = ["index.html", "about.html", "contact.html"].map(|href| Anchor {
        href,
        active: Cell::new(href == "contact.html"),
    });
    let filename = page_filename("/", &config.index_page);
    let outcome = highlight(&anchors, &filename);
    assert_eq!(outcome.active, 1);
    assert!(anchors[0].active.get());
    assert!(!anchors[2].active.get());
}

#[test]
fn configured_messaging_link_round_trips() {
    let config = PageConfig::from_json(
        r#"{"default_phone_number": "15550001111", "placeholder_message": "Hi there"}"#,
    )
    .unwrap_or_default();
    let fields = ContactFields::from_inputs(
        Some("Ann".into()),
        None,
        Some(String::new()),
        &config.placeholder_message,
    );
    let target = MessagingTarget::resolve(None, &config.default_phone_number);
    let url = build_url(&config.messaging_base_url, &target, &fields);

    let Some((path, text)) = url.split_once("?text=") else {
        panic!("url has no text parameter: {url}");
    };
    assert_eq!(path, "https://wa.me/15550001111");
    let decoded = urlencoding::decode(text).map(|v| v.into_owned()).unwrap_or_default();
    assert_eq!(decoded, "Name: Ann\nEmail: \n\nMessage: Hi there");
}

#[test]
fn rewiring_the_same_control_is_refused() {
    let mut attribute: Option<String> = None;
    let mut wired = 0;
    for _ in 0..3 {
        if let Some(next) = claim(attribute.as_deref(), WiredConcern::Messaging) {
            attribute = Some(next);
            wired += 1;
        }
    }
    assert_eq!(wired, 1);
    assert_eq!(attribute.as_deref(), Some("messaging"));
}
