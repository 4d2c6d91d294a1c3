//! Timer and animation-frame scheduler backed by `gloo-timers` and
//! `requestAnimationFrame`.
//!
//! DESIGN
//! ======
//! Intervals and timeouts are owned `gloo` handles kept in a table; dropping
//! one clears it, so `cancel` is just removal. A timeout that fires removes
//! its own entry and forgets it, since dropping a closure from inside its own
//! call is not allowed. Frames are one-shot closures; cancelling one calls
//! `cancelAnimationFrame` and leaks the never-run closure.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use js_sys::Date;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use seaton_web::platform::{Scheduler, TaskHandle};

enum Pending {
    Interval(Interval),
    Timeout(Timeout),
    Frame(i32),
}

#[derive(Default)]
struct Table {
    next_id: u64,
    pending: HashMap<u64, Pending>,
}

impl Table {
    fn reserve(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct BrowserScheduler {
    table: Rc<RefCell<Table>>,
}

impl BrowserScheduler {
    fn forget_fired(table: &Weak<RefCell<Table>>, id: u64) {
        let Some(table) = table.upgrade() else {
            return;
        };
        let fired = table.borrow_mut().pending.remove(&id);
        if let Some(Pending::Timeout(timeout)) = fired {
            timeout.forget();
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        Date::now()
    }

    fn every(&self, interval_ms: u32, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let interval = Interval::new(interval_ms, move || task());
        let mut table = self.table.borrow_mut();
        let id = table.reserve();
        table.pending.insert(id, Pending::Interval(interval));
        TaskHandle(id)
    }

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.table.borrow_mut().reserve();
        let table = Rc::downgrade(&self.table);
        let timeout = Timeout::new(delay_ms, move || {
            Self::forget_fired(&table, id);
            task();
        });
        self.table.borrow_mut().pending.insert(id, Pending::Timeout(timeout));
        TaskHandle(id)
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = self.table.borrow_mut().reserve();
        let table = Rc::downgrade(&self.table);
        let callback = Closure::once_into_js(move |_ts: f64| {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().pending.remove(&id);
            }
            task();
        });
        let requested = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))
            .and_then(|w| w.request_animation_frame(callback.unchecked_ref()));
        match requested {
            Ok(frame) => {
                self.table.borrow_mut().pending.insert(id, Pending::Frame(frame));
            }
            Err(e) => {
                leptos::logging::warn!("requestAnimationFrame failed: {}", super::js_error_message(&e));
            }
        }
        TaskHandle(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = self.table.borrow_mut().pending.remove(&handle.0);
        match removed {
            Some(Pending::Frame(frame)) => {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(frame);
                }
            }
            // Dropping the gloo handle clears it.
            Some(Pending::Interval(_) | Pending::Timeout(_)) | None => {}
        }
    }
}
