//! Browser bootstrap: waits for the document, then runs each enhancement step once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use web_sys::{Document, Window};

use crate::core::config::PageConfig;
use crate::core::error::{SiteError, SiteResult};
use crate::core::nav::{highlight, page_filename};
use crate::core::theme::{ThemeMode, ThemeService};
use crate::core::year::current_year_text;
use dom::{DomNavAnchor, DomThemePresenter};
use preferences::{LocalThemeStore, MediaPreference, load_page_config, number_override};

mod api;
mod dom;
mod preferences;
mod telemetry;
mod wiring;

type PageThemeService = ThemeService<LocalThemeStore, MediaPreference, DomThemePresenter>;

/// Theme service shared by toggle controls and the page API.
pub(crate) type SharedTheme = Rc<RefCell<PageThemeService>>;

thread_local! {
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

/// Entrypoint invoked by the wasm module. Runs the enhancer once per page,
/// immediately when the document is parsed or on `DOMContentLoaded` otherwise.
pub fn run_enhancer() {
    console_error_panic_hook::set_once();
    if STARTED.with(|started| started.replace(true)) {
        return;
    }
    if let Err(err) = start() {
        telemetry::init_logging(LevelFilter::WARN);
        warn!(error = %err, "page enhancer unavailable");
    }
}

fn start() -> SiteResult<()> {
    let window = web_sys::window().ok_or(SiteError::WindowUnavailable)?;
    let document = window.document().ok_or(SiteError::DocumentUnavailable)?;
    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_event| {
            enhance(window, document);
        })
        .forget();
    } else {
        enhance(window, document);
    }
    Ok(())
}

fn enhance(window: Window, document: Document) {
    let (config, config_error) = load_page_config(&document);
    if !telemetry::init_logging(config.log_filter().unwrap_or(LevelFilter::WARN)) {
        debug!("console subscriber already installed");
    }
    if let Some(err) = config_error {
        warn!(error = %err, ?err, "page config ignored; using defaults");
    }

    match PageEnhancer::new(window, document, config) {
        Ok(enhancer) => enhancer.run(),
        Err(err) => warn!(error = %err, "page enhancer unavailable"),
    }
}

/// Holds the browser handles and shared theme for one page.
struct PageEnhancer {
    window: Window,
    document: Document,
    config: PageConfig,
    theme: SharedTheme,
}

impl PageEnhancer {
    fn new(window: Window, document: Document, config: PageConfig) -> SiteResult<Self> {
        if document.body().is_none() {
            return Err(SiteError::DocumentUnavailable);
        }
        let theme = ThemeService::new(
            LocalThemeStore::new(&window),
            MediaPreference::new(window.clone()),
            DomThemePresenter::new(
                document.clone(),
                &config.light_class,
                &config.theme_toggle_selector,
            ),
            config.storage_key.clone(),
        );
        Ok(Self {
            window,
            document,
            config,
            theme: Rc::new(RefCell::new(theme)),
        })
    }

    fn run(&self) {
        step("year", self.stamp_year());
        step("nav", self.highlight_nav());
        step("theme", self.init_theme());
        step("theme toggles", self.wire_theme_toggles());
        step("messaging", self.wire_messaging());
        step("api", self.install_api());
        let theme = self.theme.borrow().current().map(ThemeMode::as_str);
        info!(theme = theme.unwrap_or("unset"), "page enhanced");
    }

    fn stamp_year(&self) -> SiteResult<()> {
        if let Some(element) = self.document.get_element_by_id(&self.config.year_element_id) {
            element.set_text_content(Some(&current_year_text()));
        }
        Ok(())
    }

    fn highlight_nav(&self) -> SiteResult<()> {
        let pathname = self
            .window
            .location()
            .pathname()
            .map_err(|err| SiteError::dom("read pathname", "location", dom::js_detail(&err)))?;
        let filename = page_filename(&pathname, &self.config.index_page);
        let anchors = DomNavAnchor::collect(
            &self.document,
            &self.config.nav_anchor_selector,
            &self.config.active_class,
        )?;
        let outcome = highlight(&anchors, &filename);
        debug!(
            %filename,
            active = outcome.active,
            inactive = outcome.inactive,
            skipped = outcome.skipped,
            "navigation highlighted"
        );
        Ok(())
    }

    fn init_theme(&self) -> SiteResult<()> {
        self.theme.borrow_mut().init().map(|_| ())
    }

    fn wire_theme_toggles(&self) -> SiteResult<()> {
        let wired = wiring::wire_theme_toggles(
            &self.document,
            &self.config.theme_toggle_selector,
            &self.theme,
        )?;
        debug!(wired, "theme toggles wired");
        Ok(())
    }

    fn wire_messaging(&self) -> SiteResult<()> {
        let page_override = number_override(&self.window, &self.config.number_override_global);
        let wired = wiring::wire_messaging(
            &self.window,
            &self.document,
            &self.config,
            page_override.as_deref(),
        )?;
        debug!(wired, "messaging controls wired");
        Ok(())
    }

    fn install_api(&self) -> SiteResult<()> {
        api::install(&self.window, &self.config.api_global, &self.theme)
    }
}

fn step(name: &'static str, result: SiteResult<()>) {
    if let Err(err) = result {
        warn!(
            step = name,
            operation = err.operation().unwrap_or("none"),
            error = %err,
            ?err,
            "enhancement step failed"
        );
    }
}
