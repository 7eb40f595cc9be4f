use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// One-shot `setTimeout`. Returns the handle for [`clear_timeout`].
pub(super) fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        ms.min(i32::MAX as u32) as i32,
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(?e, "setTimeout failed");
            None
        }
    }
}

pub(super) fn clear_timeout(handle: i32) {
    if let Some(w) = web_sys::window() {
        w.clear_timeout_with_handle(handle);
    }
}

pub(super) fn scroll_to_top() {
    if let Some(w) = web_sys::window() {
        w.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
