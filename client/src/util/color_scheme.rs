//! OS color-scheme signal and the `<html>` theme sink.
//!
//! The sink replaces the root's `light`/`dark` class and sets the
//! `color-scheme` property, so applying the same theme twice is a no-op on
//! the document. It also mirrors the resolved theme into the toggle's view
//! signal, which is how OS changes in `system` mode reach the UI.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use seaton_web::config::ThemeConfig;
use seaton_web::consts::PREFERS_DARK_QUERY;
use seaton_web::platform::{ColorSchemeSignal, ListenerId, ThemeSink};
use seaton_web::theme::{ResolvedTheme, ThemeController};

use super::js_error_message;
use super::storage::LocalStore;
use crate::state::theme::ThemeView;

type ChangeClosure = Closure<dyn FnMut(MediaQueryListEvent)>;

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaQuerySignal {
    query: Option<MediaQueryList>,
    listeners: RefCell<HashMap<u64, ChangeClosure>>,
    next_id: Cell<u64>,
}

impl MediaQuerySignal {
    pub fn new(media_query: &str) -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(media_query).ok().flatten());
        if query.is_none() {
            leptos::logging::warn!("matchMedia unavailable; system theme falls back to default");
        }
        Self { query, listeners: RefCell::new(HashMap::new()), next_id: Cell::new(0) }
    }
}

impl ColorSchemeSignal for MediaQuerySignal {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn subscribe(&self, mut on_change: Box<dyn FnMut(bool)>) -> Option<ListenerId> {
        let query = self.query.as_ref()?;
        let closure: ChangeClosure = Closure::new(move |event: MediaQueryListEvent| on_change(event.matches()));
        if let Err(e) = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            leptos::logging::warn!("color-scheme listener rejected: {}", js_error_message(&e));
            return None;
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().insert(id, closure);
        Some(ListenerId(id))
    }

    fn unsubscribe(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id.0) else {
            return;
        };
        if let Some(query) = &self.query {
            let _ = query.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }
    }
}

/// Writes the resolved theme to `<html>` and the toggle view.
pub struct DocumentThemeSink {
    view: RwSignal<ThemeView>,
}

impl DocumentThemeSink {
    pub fn new(view: RwSignal<ThemeView>) -> Self {
        Self { view }
    }
}

impl ThemeSink for DocumentThemeSink {
    fn apply(&self, resolved: ResolvedTheme) {
        let root = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element());
        if let Some(root) = root {
            let classes = root.class_list();
            let swapped = classes
                .remove_1(resolved.opposite().as_str())
                .and_then(|()| classes.add_1(resolved.as_str()));
            let scheme = match root.dyn_ref::<web_sys::HtmlElement>() {
                Some(html) => html.style().set_property("color-scheme", resolved.as_str()),
                None => Ok(()),
            };
            if let Err(e) = swapped.and(scheme) {
                leptos::logging::warn!("theme not fully applied to document: {}", js_error_message(&e));
            }
        }
        if self.view.try_update(|view| view.resolved = Some(resolved)).is_none() {
            leptos::logging::log!("theme view disposed; document updated only");
        }
    }
}

/// Controller wired to `localStorage`, `matchMedia`, and the document root.
pub fn browser_theme_controller(config: ThemeConfig, view: RwSignal<ThemeView>) -> ThemeController {
    ThemeController::new(config, LocalStore, MediaQuerySignal::new(PREFERS_DARK_QUERY), DocumentThemeSink::new(view))
}
