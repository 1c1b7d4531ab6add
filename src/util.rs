use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, MouseEvent, TouchEvent};

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Client coordinates of a pointer event, from `clientX/clientY` for mouse
/// events or the first touch point for touch events. `None` when the event
/// carries neither (callers treat that as a no-op).
pub fn event_point(e: &Event) -> Option<(f64, f64)> {
    if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
        return Some((mouse.client_x() as f64, mouse.client_y() as f64));
    }
    if let Some(touch) = e.dyn_ref::<TouchEvent>() {
        let first = touch.touches().item(0)?;
        return Some((first.client_x() as f64, first.client_y() as f64));
    }
    None
}

/// Human-readable message for a caught JS error value.
pub fn js_error_message(e: &JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

/// Owns a set of registered DOM listeners and their closures; removing them
/// all on drop keeps the mount-effect cleanup to a single call.
///
/// Every listener is registered with `passive: false`: the handlers here may
/// call `preventDefault`, which browsers ignore on passive listeners — and
/// `touchstart`/`touchmove` on the document are passive by default.
#[derive(Default)]
pub struct ListenerBag {
    entries: Vec<(EventTarget, &'static str, bool, Closure<dyn FnMut(Event)>)>,
}

impl ListenerBag {
    pub fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        capture: bool,
        closure: Closure<dyn FnMut(Event)>,
    ) {
        let options = AddEventListenerOptions::new();
        options.set_capture(capture);
        options.set_passive(false);
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        self.entries.push((target.clone(), kind, capture, closure));
    }

    pub fn clear(&mut self) {
        for (target, kind, capture, closure) in self.entries.drain(..) {
            let _ = target.remove_event_listener_with_callback_and_bool(
                kind,
                closure.as_ref().unchecked_ref(),
                capture,
            );
        }
    }
}

impl Drop for ListenerBag {
    fn drop(&mut self) {
        self.clear();
    }
}
