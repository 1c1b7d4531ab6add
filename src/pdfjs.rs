//! Bindings to the pdf.js global (`pdfjsLib`), loaded from the host page.
//!
//! Only the slice of the API the viewer needs: open a document by URL, walk
//! its pages by 1-based index, and rasterize each page into a 2d canvas
//! context at a chosen scale. The promise-returning calls are wrapped as
//! async methods.

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::CanvasRenderingContext2d;

#[wasm_bindgen]
extern "C" {
    pub type DocumentLoadingTask;

    #[wasm_bindgen(js_namespace = pdfjsLib, js_name = getDocument)]
    fn get_document(url: &str) -> DocumentLoadingTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &DocumentLoadingTask) -> Promise;

    pub type PdfDocument;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    pub fn num_pages(this: &PdfDocument) -> u32;

    #[wasm_bindgen(method, js_name = getPage)]
    fn get_page(this: &PdfDocument, number: u32) -> Promise;

    pub type PdfPage;

    #[wasm_bindgen(method, js_name = getViewport)]
    fn get_viewport(this: &PdfPage, params: &Object) -> PageViewport;

    #[wasm_bindgen(method)]
    fn render(this: &PdfPage, params: &Object) -> RenderTask;

    pub type PageViewport;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &PageViewport) -> f64;

    pub type RenderTask;

    #[wasm_bindgen(method, getter)]
    fn promise(this: &RenderTask) -> Promise;
}

/// Open a PDF by URL. Resolves once the document metadata is available;
/// network and parse failures surface as the rejected promise's error.
pub async fn open_document(url: &str) -> Result<PdfDocument, JsValue> {
    let task = get_document(url);
    let doc = JsFuture::from(task.promise()).await?;
    Ok(doc.unchecked_into())
}

impl PdfDocument {
    /// Fetch one page; page numbers are 1-based, as in pdf.js.
    pub async fn page(&self, number: u32) -> Result<PdfPage, JsValue> {
        let page = JsFuture::from(self.get_page(number)).await?;
        Ok(page.unchecked_into())
    }
}

impl PdfPage {
    pub fn viewport(&self, scale: f64) -> Result<PageViewport, JsValue> {
        let params = Object::new();
        Reflect::set(
            &params,
            &JsValue::from_str("scale"),
            &JsValue::from_f64(scale),
        )?;
        Ok(self.get_viewport(&params))
    }

    /// Rasterize this page into the given 2d context at the viewport's size.
    pub async fn render_into(
        &self,
        ctx: &CanvasRenderingContext2d,
        viewport: &PageViewport,
    ) -> Result<(), JsValue> {
        let params = Object::new();
        Reflect::set(&params, &JsValue::from_str("canvasContext"), ctx.as_ref())?;
        Reflect::set(&params, &JsValue::from_str("viewport"), viewport.as_ref())?;
        JsFuture::from(self.render(&params).promise()).await?;
        Ok(())
    }
}
