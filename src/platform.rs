//! Collaborator traits implemented by the host environment.
//!
//! The WASM client backs these with `web-sys`; tests back them with the
//! in-memory fakes. All methods take `&self` because browser objects are
//! handles with interior mutability, and every callback is `'static` because
//! it outlives the call that registered it.

use crate::error::{PlayError, StorageError};
use crate::media::{MediaEvent, Presentation, RenderMode};
use crate::theme::ResolvedTheme;

/// Handle for a scheduled task (interval, timeout, or animation frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

/// Handle for a registered event listener or observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Persistent string key-value store (`localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// OS-level color-scheme preference (`prefers-color-scheme: dark`).
pub trait ColorSchemeSignal {
    /// Current preference, or `None` when the query API is unavailable.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register a change listener. Returns `None` when listening is unsupported.
    fn subscribe(&self, on_change: Box<dyn FnMut(bool)>) -> Option<ListenerId>;

    fn unsubscribe(&self, id: ListenerId);
}

/// Applies a resolved theme to the document root.
///
/// Implementations must be idempotent: applying the same theme twice leaves
/// the document exactly as applying it once.
pub trait ThemeSink {
    fn apply(&self, resolved: ResolvedTheme);
}

/// Timer and animation-frame scheduling.
pub trait Scheduler {
    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;

    /// Run `task` every `interval_ms` until cancelled.
    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;

    /// Run `task` once after `delay_ms` unless cancelled first.
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` on the next animation frame unless cancelled first.
    fn next_frame(&self, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Cancel a pending task. Unknown or already-fired handles are ignored.
    fn cancel(&self, handle: TaskHandle);
}

/// The background `<video>` element.
pub trait MediaElement {
    fn set_source(&self, url: &str);

    /// Request playback. `done` receives the outcome of the play promise.
    fn play(&self, done: Box<dyn FnOnce(Result<(), PlayError>)>);

    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;

    /// Write the eased scale and opacity to the element.
    fn set_presentation(&self, presentation: Presentation);

    /// Register one handler for all media events the controller consumes.
    fn listen(&self, handler: Box<dyn FnMut(MediaEvent)>) -> ListenerId;

    fn unlisten(&self, id: ListenerId);
}

/// Container size observation (`ResizeObserver`).
pub trait ViewportObserver {
    /// Current container width in CSS pixels.
    fn width(&self) -> f64;

    /// Register a width listener. Returns `None` when observation is unsupported.
    fn observe(&self, on_resize: Box<dyn FnMut(f64)>) -> Option<ListenerId>;

    fn unobserve(&self, id: ListenerId);
}

/// Engine playback capability (`canPlayType`).
pub trait CapabilityProbe {
    fn can_play(&self, mime: &str) -> bool;
}

/// Page-level surface around the video slot.
pub trait MediaSurface {
    /// Raise or lower the page loading indicator.
    fn set_loading(&self, loading: bool);

    /// Switch what the slot renders: the video, a fallback image, or nothing.
    fn set_render_mode(&self, mode: &RenderMode);
}
