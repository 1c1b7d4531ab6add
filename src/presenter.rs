//! Applies the transform state to the DOM: inline transform on the book,
//! cursor affordance classes on the wrapper, and the transient pan hint.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlElement;

use crate::state::Transform;

const PAN_HINT_MS: i32 = 4000;

/// Idempotent: writes the current scale+translate onto the book element.
pub fn apply_transform(book: &HtmlElement, transform: &Transform) {
    let _ = book.style().set_property("transform", &transform.css_value());
}

/// Toggle the `draggable` cursor class; purely cosmetic, set exactly when the
/// book is zoomed past 100%.
pub fn sync_drag_cursor(wrapper: &HtmlElement, transform: &Transform) {
    let classes = wrapper.class_list();
    if transform.pannable() {
        let _ = classes.add_1("draggable");
    } else {
        let _ = classes.remove_1("draggable");
    }
}

pub fn set_dragging(wrapper: &HtmlElement, dragging: bool) {
    let classes = wrapper.class_list();
    if dragging {
        let _ = classes.add_1("dragging");
    } else {
        let _ = classes.remove_1("dragging");
    }
}

/// Show the instructional pan hint, auto-hiding after a fixed delay. The hide
/// timer is not cancelled if zoom drops back to 100% in the meantime.
pub fn show_pan_hint(hint: &HtmlElement) {
    let _ = hint.class_list().add_1("show");
    let Some(window) = web_sys::window() else {
        return;
    };
    let hint = hint.clone();
    let hide = Closure::once_into_js(move || {
        let _ = hint.class_list().remove_1("show");
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        hide.unchecked_ref(),
        PAN_HINT_MS,
    );
}
