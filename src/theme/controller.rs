//! Theme preference controller.
//!
//! Owns the stored mode, its resolution, and the single shared resource it
//! mutates: the document root's theme class and `color-scheme` (through
//! [`ThemeSink`]). One instance lives for the whole application.
//!
//! LIFECYCLE
//! =========
//! `new` → `start` (read storage, resolve, apply) → any number of
//! `set_theme`/OS changes → `shutdown` (or drop). The OS listener is attached
//! only while the mode is `System`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::config::ThemeConfig;
use crate::platform::{ColorSchemeSignal, KeyValueStore, ListenerId, ThemeSink};

use super::mode::{ResolvedTheme, ThemeMode, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initialized { mode: ThemeMode, resolved: ResolvedTheme },
}

struct Inner {
    config: ThemeConfig,
    store: Box<dyn KeyValueStore>,
    signal: Box<dyn ColorSchemeSignal>,
    sink: Box<dyn ThemeSink>,
    phase: Cell<Phase>,
    watch: Cell<Option<ListenerId>>,
    active: Cell<bool>,
}

/// Single source of truth for the theme preference.
pub struct ThemeController {
    inner: Rc<Inner>,
}

impl ThemeController {
    /// Build an unstarted controller. Nothing is read or applied until [`Self::start`].
    pub fn new(
        config: ThemeConfig,
        store: impl KeyValueStore + 'static,
        signal: impl ColorSchemeSignal + 'static,
        sink: impl ThemeSink + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                store: Box::new(store),
                signal: Box::new(signal),
                sink: Box::new(sink),
                phase: Cell::new(Phase::Uninitialized),
                watch: Cell::new(None),
                active: Cell::new(false),
            }),
        }
    }

    /// Read the stored mode, resolve it, and apply it. Runs once.
    pub fn start(&self) {
        if self.inner.phase.get() != Phase::Uninitialized {
            return;
        }
        self.inner.active.set(true);
        let mode = self.inner.read_stored_mode();
        tracing::debug!(%mode, "theme controller started");
        self.commit(mode);
    }

    /// Persist and apply a new mode. Never fails from the caller's view.
    pub fn set_theme(&self, mode: ThemeMode) {
        match self.inner.phase.get() {
            Phase::Uninitialized => self.start(),
            Phase::Initialized { .. } if !self.inner.active.get() => {
                tracing::debug!(%mode, "set_theme after shutdown ignored");
                return;
            }
            Phase::Initialized { .. } => {}
        }

        let key = &self.inner.config.storage_key;
        if let Err(e) = self.inner.store.set(key, mode.as_str()) {
            tracing::warn!(error = %e, %mode, "failed to persist theme preference");
        }
        self.commit(mode);
    }

    /// Flip between explicit light and dark. A `System` mode toggles to `Dark`.
    pub fn toggle(&self) -> ThemeMode {
        let next = match self.mode() {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light | ThemeMode::System => ThemeMode::Dark,
        };
        self.set_theme(next);
        next
    }

    /// Accessible label for a toggle control bound to [`Self::toggle`].
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        match self.mode() {
            ThemeMode::Dark => "Switch to light mode",
            ThemeMode::Light | ThemeMode::System => "Switch to dark mode",
        }
    }

    /// Current stored intent; the configured default before `start`.
    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        match self.inner.phase.get() {
            Phase::Uninitialized => self.inner.config.default_mode,
            Phase::Initialized { mode, .. } => mode,
        }
    }

    /// Applied theme, or `None` before the first resolution pass.
    #[must_use]
    pub fn resolved_theme(&self) -> Option<ResolvedTheme> {
        match self.inner.phase.get() {
            Phase::Uninitialized => None,
            Phase::Initialized { resolved, .. } => Some(resolved),
        }
    }

    /// Applied theme, with the configured system fallback as placeholder.
    #[must_use]
    pub fn resolved_or_default(&self) -> ResolvedTheme {
        self.resolved_theme().unwrap_or(self.inner.config.system_fallback)
    }

    /// Whether the OS change listener is currently attached.
    #[must_use]
    pub fn is_watching_system(&self) -> bool {
        self.inner.watch.get().is_some()
    }

    /// Detach the OS listener and ignore any later callbacks.
    pub fn shutdown(&self) {
        if !self.inner.active.replace(false) {
            return;
        }
        if let Some(id) = self.inner.watch.take() {
            self.inner.signal.unsubscribe(id);
        }
        tracing::debug!("theme controller shut down");
    }

    fn commit(&self, mode: ThemeMode) {
        let resolved = resolve(mode, self.inner.system_theme());
        self.inner.phase.set(Phase::Initialized { mode, resolved });
        self.inner.sink.apply(resolved);
        self.sync_watch(mode);
    }

    fn sync_watch(&self, mode: ThemeMode) {
        let watching = self.inner.watch.get();
        match (mode, watching) {
            (ThemeMode::System, None) => {
                let weak: Weak<Inner> = Rc::downgrade(&self.inner);
                let id = self.inner.signal.subscribe(Box::new(move |prefers_dark| {
                    if let Some(inner) = weak.upgrade() {
                        inner.on_system_change(prefers_dark);
                    }
                }));
                if id.is_none() {
                    tracing::debug!("color-scheme change events unsupported; system mode will not live-update");
                }
                self.inner.watch.set(id);
            }
            (ThemeMode::Light | ThemeMode::Dark, Some(id)) => {
                self.inner.watch.set(None);
                self.inner.signal.unsubscribe(id);
            }
            _ => {}
        }
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Inner {
    fn read_stored_mode(&self) -> ThemeMode {
        let fallback = self.config.default_mode;
        match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => ThemeMode::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, %fallback, "stored theme preference invalid; using default");
                fallback
            }),
            Ok(None) => fallback,
            Err(e) => {
                tracing::warn!(error = %e, %fallback, "failed to read theme preference; using default");
                fallback
            }
        }
    }

    fn system_theme(&self) -> ResolvedTheme {
        self.signal
            .prefers_dark()
            .map_or(self.config.system_fallback, ResolvedTheme::from_prefers_dark)
    }

    fn on_system_change(&self, prefers_dark: bool) {
        if !self.active.get() {
            return;
        }
        let Phase::Initialized { mode: ThemeMode::System, resolved } = self.phase.get() else {
            return;
        };
        let next = ResolvedTheme::from_prefers_dark(prefers_dark);
        tracing::debug!(from = resolved.as_str(), to = next.as_str(), "system color scheme changed");
        self.phase.set(Phase::Initialized { mode: ThemeMode::System, resolved: next });
        self.sink.apply(next);
    }
}
