//! `window.SWF` theme API for other scripts on the page.

use std::rc::Rc;

use js_sys::{Object, Reflect};
use tracing::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::app::SharedTheme;
use crate::app::dom::js_detail;
use crate::core::error::{SiteError, SiteResult};
use crate::core::theme::ThemeMode;

/// Install `{ setTheme(value), toggleTheme() }` under `window[global]`.
pub(crate) fn install(window: &Window, global: &str, theme: &SharedTheme) -> SiteResult<()> {
    let api = Object::new();

    let set_theme = {
        let theme = Rc::clone(theme);
        Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
            let requested = ThemeMode::parse(&value.as_string().unwrap_or_default());
            match theme.try_borrow_mut() {
                Ok(mut service) => {
                    if let Err(err) = service.apply(requested) {
                        warn!(error = %err, ?err, "setTheme failed");
                    }
                }
                Err(_) => warn!("setTheme called while the theme is busy"),
            }
        })
    };
    let toggle_theme = {
        let theme = Rc::clone(theme);
        Closure::<dyn Fn()>::new(move || match theme.try_borrow_mut() {
            Ok(mut service) => {
                if let Err(err) = service.toggle() {
                    warn!(error = %err, ?err, "toggleTheme failed");
                }
            }
            Err(_) => warn!("toggleTheme called while the theme is busy"),
        })
    };

    set_property(&api, "setTheme", &set_theme.into_js_value())?;
    set_property(&api, "toggleTheme", &toggle_theme.into_js_value())?;
    set_property(window, global, &api)
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) -> SiteResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map_err(|err| SiteError::dom("install api", key, js_detail(&err)))
        .map(|_| ())
}
