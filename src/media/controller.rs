//! Background video controller: mount, event handling, stall recovery,
//! viewport easing, teardown.
//!
//! DESIGN
//! ======
//! State lives in an `Rc<Shared>`. Every deferred callback (element events,
//! poll ticks, animation frames, the loading timeout, play-promise outcomes)
//! holds a `Weak<Shared>` and checks `active` before touching anything, so a
//! callback already queued when `unmount` runs is a no-op. No `RefCell`
//! borrow is held across a call into the host, which keeps synchronous host
//! implementations reentrancy-safe.
//!
//! TRADE-OFFS
//! ==========
//! Recovery retries are unbounded: each detected stall gets one nudge + play
//! request, at most once per poll interval. A decorative muted loop is cheap
//! to retry; a capped policy would need a fallback trigger of its own.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::Deserialize;

use crate::config::MediaConfig;
use crate::consts::{BUFFERED_READY_FRACTION, RECOVERY_GAP_FRACTION};
use crate::error::PlayError;
use crate::platform::{
    CapabilityProbe, ListenerId, MediaElement, MediaSurface, Scheduler, TaskHandle, ViewportObserver,
};

use super::easing::{Presentation, ViewportEasing};
use super::health::{HealthSignal, PlaybackHealth};
use super::source::{DeviceProfile, Quality, VideoSource, select_source};
use super::{MediaEvent, RenderMode};

/// Inputs of a background video slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackgroundVideoProps {
    pub sources: Vec<VideoSource>,
    pub poster: Option<String>,
    pub fallback_image: Option<String>,
    /// Raise the page loading indicator until the video is ready.
    pub priority: bool,
    pub preferred_quality: Option<Quality>,
}

/// Host collaborators for one mount.
pub struct MediaHost {
    pub element: Rc<dyn MediaElement>,
    pub scheduler: Rc<dyn Scheduler>,
    pub viewport: Rc<dyn ViewportObserver>,
    pub probe: Rc<dyn CapabilityProbe>,
    pub surface: Rc<dyn MediaSurface>,
    pub device: DeviceProfile,
}

/// Observable state of a mounted background video.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlaybackState {
    pub source_url: Option<String>,
    pub health: PlaybackHealth,
    /// Play-head at the last poll; `None` before the first one.
    pub last_observed_time: Option<f64>,
    pub presentation: Presentation,
    pub render_mode: RenderMode,
    /// Autoplay was rejected; playback resumes on the next user gesture.
    pub awaiting_gesture: bool,
    pub stall_count: u32,
    pub recovery_count: u32,
    /// Scheduler clock of the last recovery attempt.
    pub last_recovery_at: Option<f64>,
}

impl MediaPlaybackState {
    fn new(presentation: Presentation) -> Self {
        Self {
            source_url: None,
            health: PlaybackHealth::Loading,
            last_observed_time: None,
            presentation,
            render_mode: RenderMode::Video,
            awaiting_gesture: false,
            stall_count: 0,
            recovery_count: 0,
            last_recovery_at: None,
        }
    }

    #[must_use]
    pub fn viewport_scale(&self) -> f64 {
        self.presentation.scale
    }

    #[must_use]
    pub fn viewport_opacity(&self) -> f64 {
        self.presentation.opacity
    }
}

struct Shared {
    config: MediaConfig,
    fallback_image: Option<String>,
    host: MediaHost,
    state: RefCell<MediaPlaybackState>,
    easing: Cell<ViewportEasing>,
    revealed: Cell<bool>,
    active: Cell<bool>,
    loading: Cell<bool>,
    poll: Cell<Option<TaskHandle>>,
    frame: Cell<Option<TaskHandle>>,
    loading_timeout: Cell<Option<TaskHandle>>,
    element_listener: Cell<Option<ListenerId>>,
    viewport_listener: Cell<Option<ListenerId>>,
}

/// A mounted background video. Dropping it unmounts.
pub struct MediaController {
    shared: Rc<Shared>,
}

impl MediaController {
    /// Select a source, attach listeners, start polling and observing.
    pub fn mount(props: BackgroundVideoProps, config: MediaConfig, host: MediaHost) -> Self {
        let hidden = config.hidden;
        let shared = Rc::new(Shared {
            config,
            fallback_image: props.fallback_image.clone(),
            host,
            state: RefCell::new(MediaPlaybackState::new(hidden)),
            easing: Cell::new(ViewportEasing::new(hidden)),
            revealed: Cell::new(false),
            active: Cell::new(true),
            loading: Cell::new(false),
            poll: Cell::new(None),
            frame: Cell::new(None),
            loading_timeout: Cell::new(None),
            element_listener: Cell::new(None),
            viewport_listener: Cell::new(None),
        });
        shared.attach(&props);
        Self { shared }
    }

    /// Release every listener, observer, and pending task. Idempotent.
    pub fn unmount(&self) {
        let s = &self.shared;
        if !s.active.replace(false) {
            return;
        }
        for handle in [s.poll.take(), s.frame.take(), s.loading_timeout.take()].into_iter().flatten() {
            s.host.scheduler.cancel(handle);
        }
        if let Some(id) = s.element_listener.take() {
            s.host.element.unlisten(id);
        }
        if let Some(id) = s.viewport_listener.take() {
            s.host.viewport.unobserve(id);
        }
        if s.loading.replace(false) {
            s.host.surface.set_loading(false);
        }
        tracing::debug!("background video unmounted");
    }

    /// Re-issue the play request after autoplay was blocked.
    pub fn on_user_gesture(&self) {
        let s = &self.shared;
        if !s.active.get() || s.health().is_terminal() {
            return;
        }
        if s.state.borrow().awaiting_gesture {
            s.request_play();
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.active.get()
    }

    #[must_use]
    pub fn health(&self) -> PlaybackHealth {
        self.shared.health()
    }

    #[must_use]
    pub fn source_url(&self) -> Option<String> {
        self.shared.state.borrow().source_url.clone()
    }

    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        self.shared.state.borrow().render_mode.clone()
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.shared.state.borrow().presentation
    }

    #[must_use]
    pub fn snapshot(&self) -> MediaPlaybackState {
        self.shared.state.borrow().clone()
    }
}

impl Drop for MediaController {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl Shared {
    fn attach(self: &Rc<Self>, props: &BackgroundVideoProps) {
        let weak = Rc::downgrade(self);
        let listener = self.host.element.listen(Box::new(move |event| {
            if let Some(s) = weak.upgrade() {
                s.on_event(event);
            }
        }));
        self.element_listener.set(Some(listener));

        let weak = Rc::downgrade(self);
        let observer = self.host.viewport.observe(Box::new(move |width| {
            if let Some(s) = weak.upgrade() {
                s.on_resize(width);
            }
        }));
        self.viewport_listener.set(observer);
        self.host.element.set_presentation(self.config.hidden);

        let weak = Rc::downgrade(self);
        let poll = self.host.scheduler.every(
            self.config.poll_interval_ms,
            Box::new(move || {
                if let Some(s) = weak.upgrade() {
                    s.on_poll();
                }
            }),
        );
        self.poll.set(Some(poll));

        if props.priority {
            self.raise_loading();
        }

        let selected = select_source(
            &props.sources,
            &self.host.device,
            &*self.host.probe,
            props.preferred_quality,
            &self.config,
        );
        match selected {
            Some(source) => {
                let url = source.src.clone();
                tracing::info!(src = %url, "background video source selected");
                self.state.borrow_mut().source_url = Some(url.clone());
                self.host.element.set_source(&url);
                self.host.surface.set_render_mode(&RenderMode::Video);
            }
            None => {
                tracing::warn!("background video has no sources");
                self.fail();
            }
        }
    }

    fn health(&self) -> PlaybackHealth {
        self.state.borrow().health
    }

    fn set_health(&self, next: PlaybackHealth) {
        let mut state = self.state.borrow_mut();
        let prev = state.health;
        if prev == next {
            return;
        }
        state.health = next;
        if next == PlaybackHealth::Stalled {
            state.stall_count += 1;
        }
        tracing::debug!(from = ?prev, to = ?next, "background video health changed");
    }

    fn on_event(self: &Rc<Self>, event: MediaEvent) {
        if !self.active.get() {
            return;
        }
        match event {
            MediaEvent::CanPlay => self.on_can_play(),
            MediaEvent::Error { message } => {
                tracing::error!(%message, "background video failed");
                self.fail();
            }
            MediaEvent::Stalled | MediaEvent::Suspend | MediaEvent::Pause => {
                if self.is_stuck() {
                    self.on_stall_event();
                }
            }
            MediaEvent::Progress { buffered_secs, duration_secs } => {
                if duration_secs > 0.0 && buffered_secs / duration_secs > BUFFERED_READY_FRACTION {
                    self.lower_loading();
                }
            }
        }
    }

    fn on_can_play(self: &Rc<Self>) {
        let health = self.health();
        if health != PlaybackHealth::Loading {
            return;
        }
        self.set_health(health.next(HealthSignal::Ready));
        self.lower_loading();
        self.revealed.set(true);
        self.retarget(self.host.viewport.width());
        self.request_play();
    }

    /// Browsers fire `suspend` and `stalled` on healthy playback once enough
    /// is buffered; only a paused, unfinished element is stuck. A pause from
    /// blocked autoplay waits for a gesture instead.
    fn is_stuck(&self) -> bool {
        let element = &self.host.element;
        element.paused() && !element.ended() && !self.state.borrow().awaiting_gesture
    }

    fn on_stall_event(self: &Rc<Self>) {
        let health = self.health();
        if !health.expects_running() {
            return;
        }
        let next = health.next(HealthSignal::StallEvent);
        self.set_health(next);
        if next == PlaybackHealth::Stalled {
            self.try_recover();
        }
    }

    fn on_poll(self: &Rc<Self>) {
        if !self.active.get() {
            return;
        }
        let health = self.health();
        if health.is_terminal() {
            return;
        }

        let element = &self.host.element;
        let position = element.current_time();
        let paused = element.paused();
        let ended = element.ended();
        let previous = self.state.borrow_mut().last_observed_time.replace(position);
        if ended || health == PlaybackHealth::Loading {
            return;
        }

        if paused {
            let awaiting = self.state.borrow().awaiting_gesture;
            if health == PlaybackHealth::Stalled && !awaiting {
                self.try_recover();
            }
            return;
        }

        let Some(previous) = previous else {
            return;
        };
        let signal = if (position - previous).abs() < f64::EPSILON {
            HealthSignal::PollUnchanged
        } else {
            HealthSignal::PollAdvanced
        };
        let next = health.next(signal);
        self.set_health(next);

        match (health, next) {
            (PlaybackHealth::Playing, PlaybackHealth::Stalled) => {
                tracing::warn!(position, "background video stalled; attempting recovery");
                self.try_recover();
            }
            (PlaybackHealth::Stalled, PlaybackHealth::Stalled) => self.try_recover(),
            (PlaybackHealth::Stalled, PlaybackHealth::Playing) => {
                tracing::info!(position, "background video recovered");
            }
            _ => {}
        }
    }

    /// Nudge the play-head and re-issue play, at most once per poll interval.
    /// Timer ticks drift against the clock, so the gap allows some slack.
    fn try_recover(self: &Rc<Self>) {
        let now = self.host.scheduler.now_ms();
        let min_gap = f64::from(self.config.poll_interval_ms) * RECOVERY_GAP_FRACTION;
        let last = self.state.borrow().last_recovery_at;
        if last.is_some_and(|at| now - at < min_gap) {
            tracing::debug!("stall recovery rate-limited");
            return;
        }

        let element = &self.host.element;
        element.set_current_time(element.current_time() + self.config.nudge_secs);
        let observed = element.current_time();
        {
            let mut state = self.state.borrow_mut();
            state.recovery_count += 1;
            state.last_recovery_at = Some(now);
            state.last_observed_time = Some(observed);
        }
        self.request_play();
    }

    fn request_play(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        self.host.element.play(Box::new(move |outcome| {
            if let Some(s) = weak.upgrade() {
                s.on_play_settled(outcome);
            }
        }));
    }

    fn on_play_settled(&self, outcome: Result<(), PlayError>) {
        if !self.active.get() {
            return;
        }
        let awaiting = match outcome {
            Ok(()) => false,
            Err(PlayError::NotAllowed) => {
                tracing::debug!("autoplay blocked; waiting for a user gesture");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "play request failed");
                return;
            }
        };
        self.state.borrow_mut().awaiting_gesture = awaiting;
    }

    /// Hard error: terminal for this mount.
    fn fail(&self) {
        self.set_health(self.health().next(HealthSignal::HardError));
        for handle in [self.poll.take(), self.frame.take()].into_iter().flatten() {
            self.host.scheduler.cancel(handle);
        }
        self.lower_loading();

        let mode = match &self.fallback_image {
            Some(url) => RenderMode::FallbackImage(url.clone()),
            None => RenderMode::Empty,
        };
        self.state.borrow_mut().render_mode = mode.clone();
        self.host.surface.set_render_mode(&mode);
    }

    fn raise_loading(self: &Rc<Self>) {
        self.loading.set(true);
        self.host.surface.set_loading(true);
        let weak = Rc::downgrade(self);
        let timeout = self.host.scheduler.after(
            self.config.loading_timeout_ms,
            Box::new(move || {
                if let Some(s) = weak.upgrade() {
                    if s.active.get() {
                        s.loading_timeout.set(None);
                        s.lower_loading();
                    }
                }
            }),
        );
        self.loading_timeout.set(Some(timeout));
    }

    fn lower_loading(&self) {
        if let Some(handle) = self.loading_timeout.take() {
            self.host.scheduler.cancel(handle);
        }
        if self.loading.replace(false) {
            self.host.surface.set_loading(false);
        }
    }

    fn on_resize(self: &Rc<Self>, width: f64) {
        if !self.active.get() || self.health().is_terminal() || !self.revealed.get() {
            return;
        }
        self.retarget(width);
    }

    fn retarget(self: &Rc<Self>, width: f64) {
        let mut easing = self.easing.get();
        easing.retarget(Presentation::for_container(width, &self.config));
        self.easing.set(easing);
        self.ensure_frame();
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.get().is_some() || self.easing.get().is_settled(self.config.epsilon) {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = self.host.scheduler.next_frame(Box::new(move || {
            if let Some(s) = weak.upgrade() {
                s.on_frame();
            }
        }));
        self.frame.set(Some(handle));
    }

    fn on_frame(self: &Rc<Self>) {
        if !self.active.get() {
            return;
        }
        self.frame.set(None);
        if self.health().is_terminal() {
            return;
        }
        let mut easing = self.easing.get();
        let presentation = easing.step(self.config.blend, self.config.epsilon);
        self.easing.set(easing);
        self.state.borrow_mut().presentation = presentation;
        self.host.element.set_presentation(presentation);
        self.ensure_frame();
    }
}
