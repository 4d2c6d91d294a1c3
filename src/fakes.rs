//! In-memory implementations of the [`crate::platform`] traits for tests.
//!
//! Each fake is a cheap `Clone` over shared state, so a test keeps one handle
//! for assertions and hands another to the controller. Callbacks are invoked
//! from a snapshot of the listener list so a callback may (un)register
//! listeners without tripping a `RefCell` borrow.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::error::{PlayError, StorageError};
use crate::media::{MediaEvent, Presentation, RenderMode};
use crate::platform::{
    CapabilityProbe, ColorSchemeSignal, KeyValueStore, ListenerId, MediaElement, MediaSurface, Scheduler,
    TaskHandle, ThemeSink, ViewportObserver,
};
use crate::theme::ResolvedTheme;

type Shared<T> = Rc<RefCell<T>>;

fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

fn next_id(counter: &Cell<u64>) -> u64 {
    let id = counter.get() + 1;
    counter.set(id);
    id
}

// =============================================================
// MemoryStore
// =============================================================

#[derive(Default)]
struct StoreState {
    values: RefCell<HashMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    write_attempts: Cell<u32>,
}

/// `localStorage` stand-in with switchable failures.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Rc<StoreState>,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.state.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.state.values.borrow().get(key).cloned()
    }

    pub fn fail_reads(&self) {
        self.state.fail_reads.set(true);
    }

    pub fn fail_writes(&self) {
        self.state.fail_writes.set(true);
    }

    pub fn write_attempts(&self) -> u32 {
        self.state.write_attempts.get()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.state.fail_reads.get() {
            return Err(StorageError::ReadFailed("blocked".into()));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.state.write_attempts.set(self.state.write_attempts.get() + 1);
        if self.state.fail_writes.get() {
            return Err(StorageError::WriteFailed("quota exceeded".into()));
        }
        self.state.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================
// FakeColorScheme
// =============================================================

type SchemeListener = Shared<Box<dyn FnMut(bool)>>;

#[derive(Default)]
struct SchemeState {
    prefers_dark: Cell<Option<bool>>,
    unsupported: Cell<bool>,
    listeners: RefCell<Vec<(u64, SchemeListener)>>,
    next_id: Cell<u64>,
}

/// `prefers-color-scheme` media query stand-in.
#[derive(Clone, Default)]
pub struct FakeColorScheme {
    state: Rc<SchemeState>,
}

impl FakeColorScheme {
    pub fn prefers(dark: bool) -> Self {
        let scheme = Self::default();
        scheme.state.prefers_dark.set(Some(dark));
        scheme
    }

    /// No query API at all: no value and no change events.
    pub fn unavailable() -> Self {
        let scheme = Self::default();
        scheme.state.unsupported.set(true);
        scheme
    }

    /// Change the OS preference and notify listeners.
    pub fn flip(&self, dark: bool) {
        self.state.prefers_dark.set(Some(dark));
        let listeners: Vec<SchemeListener> =
            self.state.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            (listener.borrow_mut())(dark);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl ColorSchemeSignal for FakeColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.state.prefers_dark.get()
    }

    fn subscribe(&self, on_change: Box<dyn FnMut(bool)>) -> Option<ListenerId> {
        if self.state.unsupported.get() {
            return None;
        }
        let id = next_id(&self.state.next_id);
        self.state.listeners.borrow_mut().push((id, shared(on_change)));
        Some(ListenerId(id))
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state.listeners.borrow_mut().retain(|(own, _)| *own != id.0);
    }
}

// =============================================================
// RecordingSink
// =============================================================

/// Records every applied theme.
#[derive(Clone, Default)]
pub struct RecordingSink {
    applied: Shared<Vec<ResolvedTheme>>,
}

impl RecordingSink {
    pub fn applied(&self) -> Vec<ResolvedTheme> {
        self.applied.borrow().clone()
    }

    pub fn last(&self) -> Option<ResolvedTheme> {
        self.applied.borrow().last().copied()
    }
}

impl ThemeSink for RecordingSink {
    fn apply(&self, resolved: ResolvedTheme) {
        self.applied.borrow_mut().push(resolved);
    }
}

// =============================================================
// ManualScheduler
// =============================================================

enum Job {
    Every { interval: u32, due: f64, task: Shared<Box<dyn FnMut()>> },
    After { due: f64, task: Box<dyn FnOnce()> },
    Frame(Box<dyn FnOnce()>),
}

#[derive(Default)]
struct SchedulerState {
    now: Cell<f64>,
    next_id: Cell<u64>,
    jobs: RefCell<BTreeMap<u64, Job>>,
    cancelled: RefCell<Vec<Job>>,
}

/// Virtual clock. Timers fire only from [`Self::advance`], frames only from
/// [`Self::run_frame`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<SchedulerState>,
}

impl ManualScheduler {
    /// Move the clock forward, firing due timers in due order.
    pub fn advance(&self, ms: u32) {
        let target = self.state.now.get() + f64::from(ms);
        loop {
            let next = self
                .state
                .jobs
                .borrow()
                .iter()
                .filter_map(|(id, job)| match job {
                    Job::Every { due, .. } | Job::After { due, .. } => Some((*due, *id)),
                    Job::Frame(_) => None,
                })
                .filter(|(due, _)| *due <= target)
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            let Some((due, id)) = next else {
                break;
            };
            self.state.now.set(due);
            let job = self.state.jobs.borrow_mut().remove(&id);
            match job {
                Some(Job::Every { interval, task, .. }) => {
                    let rearmed = Job::Every { interval, due: due + f64::from(interval), task: Rc::clone(&task) };
                    self.state.jobs.borrow_mut().insert(id, rearmed);
                    (task.borrow_mut())();
                }
                Some(Job::After { task, .. }) => task(),
                Some(Job::Frame(_)) | None => {}
            }
        }
        self.state.now.set(target);
    }

    /// Run the frame callbacks queued before this call. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let ids: Vec<u64> = self
            .state
            .jobs
            .borrow()
            .iter()
            .filter(|(_, job)| matches!(job, Job::Frame(_)))
            .map(|(id, _)| *id)
            .collect();
        let mut ran = 0;
        for id in ids {
            let job = self.state.jobs.borrow_mut().remove(&id);
            if let Some(Job::Frame(task)) = job {
                task();
                ran += 1;
            }
        }
        ran
    }

    /// Run frames until none are queued or `limit` frames have run.
    pub fn run_frames(&self, limit: usize) -> usize {
        let mut frames = 0;
        while frames < limit && self.run_frame() > 0 {
            frames += 1;
        }
        frames
    }

    /// Invoke every cancelled task once, as a late browser callback would.
    pub fn replay_cancelled(&self) {
        let cancelled: Vec<Job> = self.state.cancelled.borrow_mut().drain(..).collect();
        for job in cancelled {
            match job {
                Job::Every { task, .. } => (task.borrow_mut())(),
                Job::After { task, .. } | Job::Frame(task) => task(),
            }
        }
    }

    pub fn pending_intervals(&self) -> usize {
        self.count(|job| matches!(job, Job::Every { .. }))
    }

    pub fn pending_timeouts(&self) -> usize {
        self.count(|job| matches!(job, Job::After { .. }))
    }

    pub fn pending_frames(&self) -> usize {
        self.count(|job| matches!(job, Job::Frame(_)))
    }

    fn count(&self, pred: impl Fn(&Job) -> bool) -> usize {
        self.state.jobs.borrow().values().filter(|job| pred(job)).count()
    }

    fn push(&self, job: Job) -> TaskHandle {
        let id = next_id(&self.state.next_id);
        self.state.jobs.borrow_mut().insert(id, job);
        TaskHandle(id)
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.state.now.get()
    }

    fn every(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle {
        let due = self.state.now.get() + f64::from(interval_ms);
        self.push(Job::Every { interval: interval_ms, due, task: shared(task) })
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let due = self.state.now.get() + f64::from(delay_ms);
        self.push(Job::After { due, task })
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> TaskHandle {
        self.push(Job::Frame(task))
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = self.state.jobs.borrow_mut().remove(&handle.0);
        if let Some(job) = removed {
            self.state.cancelled.borrow_mut().push(job);
        }
    }
}

// =============================================================
// FakeVideo
// =============================================================

type MediaListener = Shared<Box<dyn FnMut(MediaEvent)>>;
type PlayCallback = Box<dyn FnOnce(Result<(), PlayError>)>;

struct VideoState {
    src: RefCell<Option<String>>,
    current_time: Cell<f64>,
    paused: Cell<bool>,
    ended: Cell<bool>,
    presentations: RefCell<Vec<Presentation>>,
    play_requests: Cell<u32>,
    seeks: RefCell<Vec<f64>>,
    auto_settle: RefCell<Option<Result<(), PlayError>>>,
    pending_plays: RefCell<Vec<PlayCallback>>,
    listeners: RefCell<Vec<(u64, MediaListener)>>,
    removed: RefCell<Vec<MediaListener>>,
    next_id: Cell<u64>,
}

/// `<video>` stand-in. Play requests settle immediately with `Ok` unless
/// told otherwise.
#[derive(Clone)]
pub struct FakeVideo {
    state: Rc<VideoState>,
}

impl Default for FakeVideo {
    fn default() -> Self {
        Self {
            state: Rc::new(VideoState {
                src: RefCell::new(None),
                current_time: Cell::new(0.0),
                paused: Cell::new(true),
                ended: Cell::new(false),
                presentations: RefCell::new(Vec::new()),
                play_requests: Cell::new(0),
                seeks: RefCell::new(Vec::new()),
                auto_settle: RefCell::new(Some(Ok(()))),
                pending_plays: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                removed: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }
}

impl FakeVideo {
    /// Settle every later play request with `outcome`; `None` leaves them pending.
    pub fn settle_plays_with(&self, outcome: Option<Result<(), PlayError>>) {
        *self.state.auto_settle.borrow_mut() = outcome;
    }

    /// Settle queued play requests.
    pub fn settle_pending(&self, outcome: &Result<(), PlayError>) {
        let pending: Vec<PlayCallback> = self.state.pending_plays.borrow_mut().drain(..).collect();
        if outcome.is_ok() && !pending.is_empty() {
            self.state.paused.set(false);
        }
        for done in pending {
            done(outcome.clone());
        }
    }

    pub fn emit(&self, event: &MediaEvent) {
        let listeners: Vec<MediaListener> =
            self.state.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            (listener.borrow_mut())(event.clone());
        }
    }

    /// Deliver an event to listeners that were already removed.
    pub fn emit_to_removed(&self, event: &MediaEvent) {
        let removed: Vec<MediaListener> = self.state.removed.borrow().clone();
        for listener in removed {
            (listener.borrow_mut())(event.clone());
        }
    }

    pub fn set_time(&self, seconds: f64) {
        self.state.current_time.set(seconds);
    }

    pub fn set_paused(&self, paused: bool) {
        self.state.paused.set(paused);
    }

    pub fn set_ended(&self, ended: bool) {
        self.state.ended.set(ended);
    }

    pub fn src(&self) -> Option<String> {
        self.state.src.borrow().clone()
    }

    pub fn play_requests(&self) -> u32 {
        self.state.play_requests.get()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.state.seeks.borrow().clone()
    }

    pub fn presentations(&self) -> Vec<Presentation> {
        self.state.presentations.borrow().clone()
    }

    pub fn last_presentation(&self) -> Option<Presentation> {
        self.state.presentations.borrow().last().copied()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl MediaElement for FakeVideo {
    fn set_source(&self, url: &str) {
        *self.state.src.borrow_mut() = Some(url.to_owned());
    }

    fn play(&self, done: PlayCallback) {
        self.state.play_requests.set(self.state.play_requests.get() + 1);
        let settle = self.state.auto_settle.borrow().clone();
        match settle {
            Some(outcome) => {
                if outcome.is_ok() {
                    self.state.paused.set(false);
                }
                done(outcome);
            }
            None => self.state.pending_plays.borrow_mut().push(done),
        }
    }

    fn current_time(&self) -> f64 {
        self.state.current_time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.seeks.borrow_mut().push(seconds);
        self.state.current_time.set(seconds);
    }

    fn paused(&self) -> bool {
        self.state.paused.get()
    }

    fn ended(&self) -> bool {
        self.state.ended.get()
    }

    fn set_presentation(&self, presentation: Presentation) {
        self.state.presentations.borrow_mut().push(presentation);
    }

    fn listen(&self, handler: Box<dyn FnMut(MediaEvent)>) -> ListenerId {
        let id = next_id(&self.state.next_id);
        self.state.listeners.borrow_mut().push((id, shared(handler)));
        ListenerId(id)
    }

    fn unlisten(&self, id: ListenerId) {
        let mut listeners = self.state.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(own, _)| *own == id.0) {
            let (_, listener) = listeners.remove(index);
            self.state.removed.borrow_mut().push(listener);
        }
    }
}

// =============================================================
// FakeViewport
// =============================================================

type ResizeListener = Shared<Box<dyn FnMut(f64)>>;

#[derive(Default)]
struct ViewportState {
    width: Cell<f64>,
    listeners: RefCell<Vec<(u64, ResizeListener)>>,
    removed: RefCell<Vec<ResizeListener>>,
    next_id: Cell<u64>,
}

/// `ResizeObserver` stand-in.
#[derive(Clone, Default)]
pub struct FakeViewport {
    state: Rc<ViewportState>,
}

impl FakeViewport {
    pub fn with_width(width: f64) -> Self {
        let viewport = Self::default();
        viewport.state.width.set(width);
        viewport
    }

    pub fn resize(&self, width: f64) {
        self.state.width.set(width);
        let listeners: Vec<ResizeListener> =
            self.state.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            (listener.borrow_mut())(width);
        }
    }

    /// Deliver a resize to observers that were already removed.
    pub fn resize_removed(&self, width: f64) {
        let removed: Vec<ResizeListener> = self.state.removed.borrow().clone();
        for listener in removed {
            (listener.borrow_mut())(width);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl ViewportObserver for FakeViewport {
    fn width(&self) -> f64 {
        self.state.width.get()
    }

    fn observe(&self, on_resize: Box<dyn FnMut(f64)>) -> Option<ListenerId> {
        let id = next_id(&self.state.next_id);
        self.state.listeners.borrow_mut().push((id, shared(on_resize)));
        Some(ListenerId(id))
    }

    fn unobserve(&self, id: ListenerId) {
        let mut listeners = self.state.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(own, _)| *own == id.0) {
            let (_, listener) = listeners.remove(index);
            self.state.removed.borrow_mut().push(listener);
        }
    }
}

// =============================================================
// FakeProbe / FakeSurface
// =============================================================

/// `canPlayType` stand-in answering by MIME prefix.
#[derive(Clone, Default)]
pub struct FakeProbe {
    supported: Vec<String>,
}

impl FakeProbe {
    pub fn supporting(prefixes: &[&str]) -> Self {
        Self { supported: prefixes.iter().map(|p| (*p).to_owned()).collect() }
    }
}

impl CapabilityProbe for FakeProbe {
    fn can_play(&self, mime: &str) -> bool {
        self.supported.iter().any(|prefix| mime.starts_with(prefix.as_str()))
    }
}

#[derive(Default)]
struct SurfaceState {
    loading: RefCell<Vec<bool>>,
    modes: RefCell<Vec<RenderMode>>,
}

/// Records loading-indicator and render-mode writes.
#[derive(Clone, Default)]
pub struct FakeSurface {
    state: Rc<SurfaceState>,
}

impl FakeSurface {
    pub fn is_loading(&self) -> bool {
        self.state.loading.borrow().last().copied().unwrap_or(false)
    }

    pub fn loading_log(&self) -> Vec<bool> {
        self.state.loading.borrow().clone()
    }

    pub fn last_render_mode(&self) -> Option<RenderMode> {
        self.state.modes.borrow().last().cloned()
    }
}

impl MediaSurface for FakeSurface {
    fn set_loading(&self, loading: bool) {
        self.state.loading.borrow_mut().push(loading);
    }

    fn set_render_mode(&self, mode: &RenderMode) {
        self.state.modes.borrow_mut().push(mode.clone());
    }
}
