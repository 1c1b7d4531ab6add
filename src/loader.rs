//! One-time document bootstrap: rasterize every PDF page, size the book to
//! the viewport, and construct the page-flip widget. Runs once at startup;
//! any failure here aborts initialization and is shown inline.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::pageflip::{FlipSettings, PageFlip};
use crate::pdfjs::{self, PdfDocument};
use crate::util::clog;

/// Pages are rendered once at this scale and never re-rendered; display
/// sizing is done by the widget and the CSS transform.
const RENDER_SCALE: f64 = 2.0;

/// Pixels reserved around the book inside the viewport.
const VIEWPORT_MARGIN: f64 = 32.0;
const MIN_AVAILABLE: f64 = 200.0;
const MAX_BOOK_WIDTH: f64 = 1000.0;
const WIDTH_SHARE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookSize {
    pub width: u32,
    pub height: u32,
}

/// Fit the book's display box to the viewport: bounded by a maximum width and
/// by the height left under the toolbar, preserving the first page's aspect
/// ratio. `natural_ratio` is width over height.
pub fn compute_book_size(
    natural_ratio: f64,
    viewport_w: f64,
    viewport_h: f64,
    chrome_h: f64,
) -> BookSize {
    let available_h = (viewport_h - chrome_h - VIEWPORT_MARGIN).max(MIN_AVAILABLE);
    let available_w = (viewport_w - VIEWPORT_MARGIN).max(MIN_AVAILABLE);

    let mut width = (available_w * WIDTH_SHARE).min(MAX_BOOK_WIDTH);
    let mut height = width / natural_ratio;
    if height > available_h {
        height = available_h;
        width = height * natural_ratio;
    }

    BookSize {
        width: width.floor() as u32,
        height: height.floor() as u32,
    }
}

/// Render every page once at high quality, each into its own canvas wrapped
/// in a `div.page`. Pages are rendered sequentially to bound peak memory from
/// raster buffers. Returns the wrappers and the first page's aspect ratio.
async fn render_pages(
    document: &Document,
    doc: &PdfDocument,
) -> Result<(Vec<HtmlElement>, f64), JsValue> {
    let page_count = doc.num_pages();
    if page_count == 0 {
        return Err(JsValue::from_str("document has no pages"));
    }

    let mut pages = Vec::with_capacity(page_count as usize);
    let mut natural_ratio = 1.0;
    for number in 1..=page_count {
        let page = doc.page(number).await?;
        let viewport = page.viewport(RENDER_SCALE)?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(viewport.width() as u32);
        canvas.set_height(viewport.height() as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d canvas context"))?
            .dyn_into()?;
        page.render_into(&ctx, &viewport).await?;

        if number == 1 && viewport.height() > 0.0 {
            natural_ratio = viewport.width() / viewport.height();
        }

        let wrapper: HtmlElement = document.create_element("div")?.dyn_into()?;
        wrapper.class_list().add_1("page")?;
        wrapper.append_child(&canvas)?;
        pages.push(wrapper);
    }
    Ok((pages, natural_ratio))
}

/// Full bootstrap: open the document, rasterize its pages into the book
/// container, and hand them to a freshly constructed page-flip widget sized
/// to the current viewport.
pub async fn build_book(book: &HtmlElement, url: &str) -> Result<PageFlip, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let doc = pdfjs::open_document(url).await?;
    let (pages, natural_ratio) = render_pages(&document, &doc).await?;
    clog(&format!("rendered {} pages from {url}", pages.len()));

    for page in &pages {
        book.append_child(page)?;
    }

    let viewport_w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    let chrome_h = document
        .get_element_by_id("toolbar")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.client_height() as f64)
        .unwrap_or(0.0);
    let size = compute_book_size(natural_ratio, viewport_w, viewport_h, chrome_h);

    let settings = FlipSettings::stretch(&size, natural_ratio);
    let flip = PageFlip::new(book, &settings.to_js()?);
    flip.load_from_html(&pages.iter().collect::<Array>());
    Ok(flip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_capped_at_the_maximum() {
        // Wide viewport, square-ish pages: width hits the 1000px cap.
        let size = compute_book_size(1.0, 3000.0, 2000.0, 56.0);
        assert_eq!(size.width, 1000);
        assert_eq!(size.height, 1000);
    }

    #[test]
    fn tall_pages_are_fitted_by_height() {
        let ratio = 0.75; // portrait page
        let size = compute_book_size(ratio, 1200.0, 700.0, 56.0);
        let available_h: f64 = 700.0 - 56.0 - 32.0;
        assert_eq!(size.height, available_h.floor() as u32);
        assert_eq!(size.width, (available_h * ratio).floor() as u32);
    }

    #[test]
    fn ratio_is_preserved_when_fitting() {
        let ratio = 1.6;
        let size = compute_book_size(ratio, 900.0, 500.0, 56.0);
        let got = size.width as f64 / size.height as f64;
        // Flooring introduces at most a pixel of drift.
        assert!((got - ratio).abs() < 0.01, "ratio drifted: {got}");
    }

    #[test]
    fn tiny_viewports_use_the_floor_dimensions() {
        let size = compute_book_size(1.0, 100.0, 100.0, 56.0);
        // Both available dimensions clamp to 200 before fitting.
        assert_eq!(size.width, 180); // 200 * 0.9
        assert_eq!(size.height, 180);
    }

    #[test]
    fn dimensions_are_floored() {
        let size = compute_book_size(1.5, 800.0, 10_000.0, 0.0);
        let width: f64 = (800.0 - 32.0) * 0.9; // 691.2
        assert_eq!(size.width, width.floor() as u32);
        assert_eq!(size.height, (width / 1.5).floor() as u32);
    }
}
