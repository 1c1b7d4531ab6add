//! Bindings to the StPageFlip widget (`St.PageFlip` global) plus the adapter
//! that keeps its own mouse handling out of the way while the book is zoomed.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::loader::BookSize;

pub const MIN_BOOK_WIDTH: u32 = 280;
const FLIP_DURATION_MS: u32 = 700;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = St, js_name = PageFlip)]
    pub type PageFlip;

    #[wasm_bindgen(constructor, js_namespace = St, js_class = "PageFlip")]
    pub fn new(container: &HtmlElement, settings: &JsValue) -> PageFlip;

    #[wasm_bindgen(method, js_name = loadFromHTML)]
    pub fn load_from_html(this: &PageFlip, pages: &js_sys::Array);

    /// Runtime option update; not supported by every build of the widget, so
    /// failures are caught and surfaced as `Err`.
    #[wasm_bindgen(method, catch, js_name = updateOptions)]
    pub fn update_options(this: &PageFlip, options: &JsValue) -> Result<(), JsValue>;
}

/// Construction-time settings, serialized with the widget's camelCase names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipSettings {
    pub width: u32,
    pub height: u32,
    pub size: &'static str,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub show_cover: bool,
    pub flipping_time: u32,
    pub use_mouse_events: bool,
}

impl FlipSettings {
    /// Stretch-to-fill sizing bound to the computed book box, keeping the
    /// page aspect ratio for the minimum height.
    pub fn stretch(size: &BookSize, natural_ratio: f64) -> Self {
        Self {
            width: size.width,
            height: size.height,
            size: "stretch",
            min_width: MIN_BOOK_WIDTH,
            max_width: size.width,
            min_height: (MIN_BOOK_WIDTH as f64 / natural_ratio).round() as u32,
            max_height: size.height,
            show_cover: true,
            flipping_time: FLIP_DURATION_MS,
            use_mouse_events: true,
        }
    }

    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlipUpdate {
    use_mouse_events: bool,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Keep the widget's own pointer handling enabled only while not zoomed, so a
/// pan gesture is never read as a page turn. If the widget rejects the option
/// update, gate pointer events on the book container directly instead; the
/// invariant holds either way.
pub fn sync_mouse_handling(flip: &PageFlip, book: &HtmlElement, zoomed_in: bool) {
    let enabled = !zoomed_in;
    let request = to_js(&FlipUpdate {
        use_mouse_events: enabled,
    })
    .and_then(|options| flip.update_options(&options));
    if request.is_err() {
        let _ = book
            .style()
            .set_property("pointer-events", if enabled { "auto" } else { "none" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_serialize_with_widget_field_names() {
        let settings = FlipSettings::stretch(
            &BookSize {
                width: 900,
                height: 600,
            },
            1.5,
        );
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["size"], "stretch");
        assert_eq!(value["minWidth"], 280);
        assert_eq!(value["maxWidth"], 900);
        assert_eq!(value["minHeight"], 187); // round(280 / 1.5)
        assert_eq!(value["maxHeight"], 600);
        assert_eq!(value["showCover"], true);
        assert_eq!(value["flippingTime"], 700);
        assert_eq!(value["useMouseEvents"], true);
    }

    #[test]
    fn update_request_uses_camel_case() {
        let value = serde_json::to_value(FlipUpdate {
            use_mouse_events: false,
        })
        .unwrap();
        assert_eq!(value["useMouseEvents"], false);
    }
}
