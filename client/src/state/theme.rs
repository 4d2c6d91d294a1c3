//! Theme view model and the process-wide controller handle.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use leptos::prelude::*;
use seaton_web::icon::IconName;
use seaton_web::theme::{ResolvedTheme, ThemeController, ThemeMode};

/// What the toggle renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeView {
    pub mode: ThemeMode,
    /// `None` until the controller has started; the toggle shows a
    /// placeholder meanwhile so server and client markup agree.
    pub resolved: Option<ResolvedTheme>,
    /// Accessible label of the toggle, as the controller words it.
    pub label: &'static str,
}

impl ThemeView {
    pub fn from_controller(controller: &ThemeController) -> Self {
        Self { mode: controller.mode(), resolved: controller.resolved_theme(), label: controller.toggle_label() }
    }

    pub fn is_ready(&self) -> bool {
        self.resolved.is_some()
    }

    /// Sun while dark (click for light), moon otherwise.
    pub fn icon(&self) -> IconName {
        match self.mode {
            ThemeMode::Dark => IconName::Sun,
            ThemeMode::Light | ThemeMode::System => IconName::Moon,
        }
    }
}

/// Shared handle to the single [`ThemeController`].
///
/// The controller is not `Send`, so it sits in local arena storage; the
/// handle itself is `Copy` and can be moved into event handlers freely.
#[derive(Clone, Copy)]
pub struct ThemeControl {
    controller: StoredValue<Option<ThemeController>, LocalStorage>,
    view: RwSignal<ThemeView>,
}

impl ThemeControl {
    pub fn new(view: RwSignal<ThemeView>) -> Self {
        Self { controller: StoredValue::new_local(None), view }
    }

    pub fn view(&self) -> RwSignal<ThemeView> {
        self.view
    }

    pub fn is_installed(&self) -> bool {
        self.controller.with_value(Option::is_some)
    }

    /// Start `controller` and make it the one the toggle drives.
    pub fn install(&self, controller: ThemeController) {
        controller.start();
        self.view.set(ThemeView::from_controller(&controller));
        self.controller.set_value(Some(controller));
    }

    pub fn toggle(&self) {
        let view = self.view;
        self.controller.with_value(|slot| {
            if let Some(controller) = slot {
                controller.toggle();
                view.set(ThemeView::from_controller(controller));
            }
        });
    }

    /// Release the controller. Safe to call after the owner was disposed.
    pub fn shutdown(&self) {
        if let Some(Some(controller)) = self.controller.try_update_value(Option::take) {
            controller.shutdown();
        }
    }
}
