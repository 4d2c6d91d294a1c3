//! `<video>`, `canPlayType`, `navigator`, `ResizeObserver`, and body-class
//! adapters for the background video controller.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, HtmlVideoElement, ResizeObserver, ResizeObserverEntry};

use seaton_web::config::MediaConfig;
use seaton_web::consts::VIDEO_LOADING_CLASS;
use seaton_web::error::PlayError;
use seaton_web::media::{
    BackgroundVideoProps, DeviceProfile, EffectiveType, MediaController, MediaEvent, MediaHost, Presentation,
    RenderMode,
};
use seaton_web::platform::{CapabilityProbe, ListenerId, MediaElement, MediaSurface, ViewportObserver};

use super::js_error_message;
use super::scheduler::BrowserScheduler;
use crate::state::media::{BackdropView, VIDEO_LOCKDOWN_ATTRIBUTES};

const MEDIA_EVENTS: [&str; 6] = ["canplay", "error", "stalled", "suspend", "pause", "progress"];

type EventClosure = Closure<dyn FnMut(Event)>;
type SharedHandler = Rc<RefCell<Box<dyn FnMut(MediaEvent)>>>;

fn next(counter: &Cell<u64>) -> u64 {
    let id = counter.get() + 1;
    counter.set(id);
    id
}

// =============================================================
// Video element
// =============================================================

/// Adapter over the slot's `HtmlVideoElement`.
pub struct VideoElement {
    video: HtmlVideoElement,
    listeners: RefCell<HashMap<u64, Vec<(&'static str, EventClosure)>>>,
    next_id: Cell<u64>,
}

impl VideoElement {
    pub fn new(video: HtmlVideoElement) -> Self {
        video.set_muted(true);
        for name in VIDEO_LOCKDOWN_ATTRIBUTES {
            if let Err(e) = video.set_attribute(name, "") {
                leptos::logging::warn!("could not set {name} on background video: {}", js_error_message(&e));
            }
        }
        Self { video, listeners: RefCell::new(HashMap::new()), next_id: Cell::new(0) }
    }
}

fn translate(name: &str, video: &HtmlVideoElement) -> Option<MediaEvent> {
    match name {
        "canplay" => Some(MediaEvent::CanPlay),
        "error" => {
            let message = video
                .error()
                .map_or_else(|| "unknown media error".to_owned(), |e| format!("media error code {}", e.code()));
            Some(MediaEvent::Error { message })
        }
        "stalled" => Some(MediaEvent::Stalled),
        "suspend" => Some(MediaEvent::Suspend),
        "pause" => Some(MediaEvent::Pause),
        "progress" => {
            let buffered = video.buffered();
            let buffered_secs = if buffered.length() > 0 { buffered.end(0).unwrap_or(0.0) } else { 0.0 };
            let duration = video.duration();
            let duration_secs = if duration.is_finite() { duration } else { 0.0 };
            Some(MediaEvent::Progress { buffered_secs, duration_secs })
        }
        _ => None,
    }
}

fn play_error(value: &JsValue) -> PlayError {
    let name = Reflect::get(value, &JsValue::from_str("name")).ok().and_then(|n| n.as_string());
    match name.as_deref() {
        Some("NotAllowedError") => PlayError::NotAllowed,
        Some("AbortError") => PlayError::Aborted,
        _ => PlayError::Other(js_error_message(value)),
    }
}

impl MediaElement for VideoElement {
    fn set_source(&self, url: &str) {
        self.video.set_src(url);
        self.video.load();
    }

    fn play(&self, done: Box<dyn FnOnce(Result<(), PlayError>)>) {
        match self.video.play() {
            Ok(promise) => leptos::task::spawn_local(async move {
                let outcome = JsFuture::from(promise).await.map(|_| ()).map_err(|e| play_error(&e));
                done(outcome);
            }),
            Err(e) => done(Err(play_error(&e))),
        }
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn ended(&self) -> bool {
        self.video.ended()
    }

    fn set_presentation(&self, presentation: Presentation) {
        let style = self.video.style();
        let _ = style.set_property("opacity", &presentation.opacity.to_string());
        let _ = style.set_property("transform", &presentation.css_transform());
    }

    fn listen(&self, handler: Box<dyn FnMut(MediaEvent)>) -> ListenerId {
        let handler: SharedHandler = Rc::new(RefCell::new(handler));
        let mut attached = Vec::with_capacity(MEDIA_EVENTS.len());
        for name in MEDIA_EVENTS {
            let video = self.video.clone();
            let handler = Rc::clone(&handler);
            let closure: EventClosure = Closure::new(move |_event: Event| {
                let Some(event) = translate(name, &video) else {
                    return;
                };
                // A handler already running (nested dispatch) drops the event.
                if let Ok(mut handler) = handler.try_borrow_mut() {
                    handler(event);
                }
            });
            if let Err(e) = self.video.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
                leptos::logging::warn!("failed to listen for {name}: {}", js_error_message(&e));
                continue;
            }
            attached.push((name, closure));
        }
        let id = next(&self.next_id);
        self.listeners.borrow_mut().insert(id, attached);
        ListenerId(id)
    }

    fn unlisten(&self, id: ListenerId) {
        let Some(attached) = self.listeners.borrow_mut().remove(&id.0) else {
            return;
        };
        for (name, closure) in attached {
            let _ = self.video.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

// =============================================================
// Capability probe
// =============================================================

/// `canPlayType` on the slot's element; any non-empty answer counts.
pub struct CanPlayTypeProbe {
    video: HtmlVideoElement,
}

impl CanPlayTypeProbe {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl CapabilityProbe for CanPlayTypeProbe {
    fn can_play(&self, mime: &str) -> bool {
        !self.video.can_play_type(mime).is_empty()
    }
}

// =============================================================
// Container observer
// =============================================================

type ResizeClosure = Closure<dyn FnMut(Array)>;

/// `ResizeObserver` on the video's container.
pub struct ContainerObserver {
    element: Element,
    observers: RefCell<HashMap<u64, (ResizeObserver, ResizeClosure)>>,
    next_id: Cell<u64>,
}

impl ContainerObserver {
    pub fn new(element: Element) -> Self {
        Self { element, observers: RefCell::new(HashMap::new()), next_id: Cell::new(0) }
    }
}

impl ViewportObserver for ContainerObserver {
    fn width(&self) -> f64 {
        f64::from(self.element.client_width())
    }

    fn observe(&self, mut on_resize: Box<dyn FnMut(f64)>) -> Option<ListenerId> {
        let closure: ResizeClosure = Closure::new(move |entries: Array| {
            let last = entries.iter().filter_map(|e| e.dyn_into::<ResizeObserverEntry>().ok()).last();
            if let Some(entry) = last {
                on_resize(entry.content_rect().width());
            }
        });
        let observer = match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                leptos::logging::warn!("ResizeObserver unavailable: {}", js_error_message(&e));
                return None;
            }
        };
        observer.observe(&self.element);
        let id = next(&self.next_id);
        self.observers.borrow_mut().insert(id, (observer, closure));
        Some(ListenerId(id))
    }

    fn unobserve(&self, id: ListenerId) {
        if let Some((observer, _closure)) = self.observers.borrow_mut().remove(&id.0) {
            observer.disconnect();
        }
    }
}

// =============================================================
// Surface
// =============================================================

/// Body loading class plus the slot's view signal.
pub struct BackdropSurface {
    view: RwSignal<BackdropView>,
}

impl BackdropSurface {
    pub fn new(view: RwSignal<BackdropView>) -> Self {
        Self { view }
    }
}

impl MediaSurface for BackdropSurface {
    fn set_loading(&self, loading: bool) {
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let classes = body.class_list();
            let toggled = if loading { classes.add_1(VIDEO_LOADING_CLASS) } else { classes.remove_1(VIDEO_LOADING_CLASS) };
            if let Err(e) = toggled {
                leptos::logging::warn!("body loading class not updated: {}", js_error_message(&e));
            }
        }
        self.view.try_update(|view| view.loading = loading);
    }

    fn set_render_mode(&self, mode: &RenderMode) {
        let mode = mode.clone();
        self.view.try_update(|view| view.render_mode = mode);
    }
}

// =============================================================
// Device profile
// =============================================================

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).ok().filter(|v| !v.is_undefined() && !v.is_null())
}

/// Network, device class, and viewport signals available synchronously.
pub fn device_profile() -> DeviceProfile {
    let Some(window) = web_sys::window() else {
        return DeviceProfile::default();
    };
    let navigator = window.navigator();
    let connection = property(&navigator, "connection");
    let save_data = connection
        .as_ref()
        .and_then(|c| property(c, "saveData"))
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let effective_type = connection
        .as_ref()
        .and_then(|c| property(c, "effectiveType"))
        .and_then(|v| v.as_string())
        .map(|raw| EffectiveType::parse(&raw))
        .unwrap_or_default();
    DeviceProfile {
        save_data,
        effective_type,
        battery_level: None,
        charging: None,
        user_agent: navigator.user_agent().unwrap_or_default(),
        viewport_width: window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0),
    }
}

/// Add battery state from `navigator.getBattery()` where the engine has it.
pub async fn with_battery(mut profile: DeviceProfile) -> DeviceProfile {
    let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
        return profile;
    };
    let Some(get_battery) = property(&navigator, "getBattery").and_then(|f| f.dyn_into::<Function>().ok()) else {
        return profile;
    };
    let Some(promise) = get_battery.call0(&navigator).ok().and_then(|p| p.dyn_into::<Promise>().ok()) else {
        return profile;
    };
    match JsFuture::from(promise).await {
        Ok(battery) => {
            profile.battery_level = property(&battery, "level").and_then(|v| v.as_f64());
            profile.charging = property(&battery, "charging").and_then(|v| v.as_bool());
        }
        Err(e) => leptos::logging::log!("battery status unavailable: {}", js_error_message(&e)),
    }
    profile
}

/// Mount the controller on a rendered `<video>` inside `container`.
pub fn mount_background_video(
    video: HtmlVideoElement,
    container: Element,
    props: BackgroundVideoProps,
    config: MediaConfig,
    device: DeviceProfile,
    view: RwSignal<BackdropView>,
) -> MediaController {
    let host = MediaHost {
        element: Rc::new(VideoElement::new(video.clone())),
        scheduler: Rc::new(BrowserScheduler::default()),
        viewport: Rc::new(ContainerObserver::new(container)),
        probe: Rc::new(CanPlayTypeProbe::new(video)),
        surface: Rc::new(BackdropSurface::new(view)),
        device,
    };
    MediaController::mount(props, config, host)
}
