use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

/// Coalescing timer for the drag rebind pass.
///
/// Each `schedule` cancels the pending callback, so a burst of structural
/// changes ends in a single pass `delay_ms` after the last one.
#[derive(Clone)]
pub(crate) struct Debounce {
    delay_ms: i32,
    pending: Arc<Mutex<Option<i32>>>,
}

impl Debounce {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        let Some(win) = web_sys::window() else {
            f();
            return;
        };

        if let Ok(mut pending) = self.pending.lock() {
            if let Some(tid) = pending.take() {
                win.clear_timeout_with_handle(tid);
            }
        }

        let pending = self.pending.clone();
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            if let Ok(mut p) = pending.lock() {
                *p = None;
            }
            f();
        });

        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            Ok(tid) => {
                if let Ok(mut pending) = self.pending.lock() {
                    *pending = Some(tid);
                }
            }
            Err(_) => crate::warn_log!("menu: could not schedule drag rebind"),
        }
    }

    pub fn cancel(&self) {
        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let (Some(tid), Some(win)) = (pending.take(), web_sys::window()) {
            win.clear_timeout_with_handle(tid);
        }
    }
}
