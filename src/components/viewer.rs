use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlElement, WheelEvent};
use yew::prelude::*;

use super::zoom_controls::ZoomControls;
use crate::loader;
use crate::pageflip::{self, PageFlip};
use crate::presenter;
use crate::state::{DragSession, Transform};
use crate::util::{ListenerBag, clog, event_point, js_error_message};

#[derive(PartialEq, Clone)]
enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

/// Handles shared between the render scope, the button callbacks, and the
/// imperative DOM listeners. Elements are resolved lazily through the node
/// refs so callbacks built before first render stay valid.
#[derive(Clone)]
struct ViewerCtx {
    transform: Rc<RefCell<Transform>>,
    drag: Rc<RefCell<DragSession>>,
    flip: Rc<RefCell<Option<PageFlip>>>,
    wrapper: NodeRef,
    book: NodeRef,
    hint: NodeRef,
    zoom_pct: UseStateHandle<u32>,
}

#[derive(Clone, Copy)]
enum ZoomDir {
    In,
    Out,
}

#[derive(Properties, PartialEq, Clone)]
pub struct BookViewProps {
    /// URL of the PDF to load.
    pub src: AttrValue,
}

#[function_component(BookView)]
pub fn book_view(props: &BookViewProps) -> Html {
    let wrapper_ref = use_node_ref();
    let book_ref = use_node_ref();
    let hint_ref = use_node_ref();
    let transform = use_mut_ref(Transform::default);
    let drag = use_mut_ref(DragSession::default);
    let flip = use_mut_ref(|| None::<PageFlip>);
    let phase = use_state(|| LoadPhase::Loading);
    let zoom_pct = use_state(|| Transform::default().zoom_percent());

    let ctx = ViewerCtx {
        transform: transform.clone(),
        drag: drag.clone(),
        flip: flip.clone(),
        wrapper: wrapper_ref.clone(),
        book: book_ref.clone(),
        hint: hint_ref.clone(),
        zoom_pct: zoom_pct.clone(),
    };

    // Mount effect: async bootstrap, then listener registration. Listeners
    // are only registered once loading succeeded; on failure the viewer
    // stays inert with the error shown in place of the loading indicator.
    {
        let ctx = ctx.clone();
        let phase = phase.clone();
        let src = props.src.clone();
        use_effect_with((), move |_| {
            let bag = Rc::new(RefCell::new(ListenerBag::default()));
            let bag_cleanup = bag.clone();
            spawn_local(async move {
                let Some(book) = ctx.book.cast::<HtmlElement>() else {
                    phase.set(LoadPhase::Failed("book container not mounted".into()));
                    return;
                };
                match loader::build_book(&book, &src).await {
                    Ok(widget) => {
                        *ctx.flip.borrow_mut() = Some(widget);
                        register_interaction(&ctx, &mut bag.borrow_mut());
                        refresh_view(&ctx);
                        phase.set(LoadPhase::Ready);
                    }
                    Err(e) => {
                        web_sys::console::error_1(&e);
                        phase.set(LoadPhase::Failed(js_error_message(&e)));
                    }
                }
            });
            move || bag_cleanup.borrow_mut().clear()
        });
    }

    let on_zoom_in = {
        let ctx = ctx.clone();
        Callback::from(move |_| step_zoom(&ctx, ZoomDir::In))
    };
    let on_zoom_out = {
        let ctx = ctx.clone();
        Callback::from(move |_| step_zoom(&ctx, ZoomDir::Out))
    };

    html! {
        <div class="viewer">
            <div id="toolbar">
                <h1>{"Flipbook"}</h1>
                <ZoomControls
                    label={format!("{}%", *zoom_pct)}
                    on_zoom_in={on_zoom_in}
                    on_zoom_out={on_zoom_out}
                />
            </div>
            <div id="book-wrapper" ref={wrapper_ref.clone()}>
                {
                    match &*phase {
                        LoadPhase::Loading => html! {
                            <div id="loading">{"Loading document…"}</div>
                        },
                        LoadPhase::Failed(msg) => html! {
                            <div id="loading" class="error">{ format!("Error loading PDF: {msg}") }</div>
                        },
                        LoadPhase::Ready => html! {},
                    }
                }
                <div id="book" ref={book_ref.clone()}></div>
            </div>
            <div id="pan-hint" ref={hint_ref.clone()}>
                {"Click and drag to pan around the page"}
            </div>
        </div>
    }
}

/// Apply one zoom step and propagate it: percentage display, cursor class,
/// widget mouse-handling mode, CSS transform, and (on the crossing above
/// 100%) the transient pan hint. Entirely a no-op at the bounds.
fn step_zoom(ctx: &ViewerCtx, dir: ZoomDir) {
    // Zoom stays inert until the book is built.
    if ctx.flip.borrow().is_none() {
        return;
    }
    let change = {
        let mut t = ctx.transform.borrow_mut();
        match dir {
            ZoomDir::In => t.zoom_in(),
            ZoomDir::Out => t.zoom_out(),
        }
    };
    let Some(change) = change else {
        return;
    };
    refresh_view(ctx);
    if change.entered_pan_range {
        if let Some(hint) = ctx.hint.cast::<HtmlElement>() {
            presenter::show_pan_hint(&hint);
        }
    }
}

/// Re-sync everything derived from the transform.
fn refresh_view(ctx: &ViewerCtx) {
    let t = ctx.transform.borrow();
    ctx.zoom_pct.set(t.zoom_percent());
    if let Some(wrapper) = ctx.wrapper.cast::<HtmlElement>() {
        presenter::sync_drag_cursor(&wrapper, &t);
    }
    if let Some(book) = ctx.book.cast::<HtmlElement>() {
        presenter::apply_transform(&book, &t);
        if let Some(widget) = &*ctx.flip.borrow() {
            pageflip::sync_mouse_handling(widget, &book, t.pannable());
        }
    }
}

fn on_drag_start(ctx: &ViewerCtx, e: &Event) {
    let began = {
        let t = ctx.transform.borrow();
        match event_point(e) {
            Some(point) => ctx.drag.borrow_mut().begin(point, &t),
            None => false,
        }
    };
    if !began {
        return;
    }
    e.prevent_default();
    e.stop_propagation();
    if let Some(wrapper) = ctx.wrapper.cast::<HtmlElement>() {
        presenter::set_dragging(&wrapper, true);
    }
}

fn on_drag_move(ctx: &ViewerCtx, e: &Event) {
    let moved = {
        let mut t = ctx.transform.borrow_mut();
        match event_point(e) {
            Some(point) => ctx.drag.borrow().update(point, &mut t),
            None => false,
        }
    };
    if !moved {
        return;
    }
    e.prevent_default();
    e.stop_propagation();
    if let Some(book) = ctx.book.cast::<HtmlElement>() {
        presenter::apply_transform(&book, &ctx.transform.borrow());
    }
}

fn on_drag_end(ctx: &ViewerCtx, e: &Event) {
    // Defensive: finish() also clears a session that never saw a start.
    if !ctx.drag.borrow_mut().finish() {
        return;
    }
    e.prevent_default();
    e.stop_propagation();
    if let Some(wrapper) = ctx.wrapper.cast::<HtmlElement>() {
        presenter::set_dragging(&wrapper, false);
    }
}

fn on_wheel(ctx: &ViewerCtx, e: &Event) {
    // Scroll is always suppressed over the viewer, even at the zoom bounds.
    e.prevent_default();
    let Some(wheel) = e.dyn_ref::<WheelEvent>() else {
        return;
    };
    if wheel.delta_y() < 0.0 {
        step_zoom(ctx, ZoomDir::In);
    } else {
        step_zoom(ctx, ZoomDir::Out);
    }
}

/// Capture-phase guard on the book container: while zoomed, swallow clicks
/// and presses before the flip widget sees them. Second line of defense,
/// independent of the widget's useMouseEvents mode.
fn on_book_capture(ctx: &ViewerCtx, e: &Event) {
    if ctx.transform.borrow().pannable() {
        e.prevent_default();
        e.stop_propagation();
        e.stop_immediate_propagation();
    }
}

fn on_context_menu(ctx: &ViewerCtx, e: &Event) {
    if ctx.transform.borrow().pannable() {
        e.prevent_default();
    }
}

fn handler(ctx: &ViewerCtx, f: fn(&ViewerCtx, &Event)) -> Closure<dyn FnMut(Event)> {
    let ctx = ctx.clone();
    Closure::wrap(Box::new(move |e: Event| f(&ctx, &e)) as Box<dyn FnMut(Event)>)
}

fn register_interaction(ctx: &ViewerCtx, bag: &mut ListenerBag) {
    let Some(wrapper) = ctx.wrapper.cast::<HtmlElement>() else {
        return;
    };
    let Some(book) = ctx.book.cast::<HtmlElement>() else {
        return;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    // Drags start on the wrapper; moves and releases are tracked on the
    // whole document so a drag survives leaving the wrapper.
    for kind in ["mousedown", "touchstart"] {
        bag.listen(wrapper.as_ref(), kind, false, handler(ctx, on_drag_start));
    }
    for kind in ["mousemove", "touchmove"] {
        bag.listen(document.as_ref(), kind, false, handler(ctx, on_drag_move));
    }
    for kind in ["mouseup", "touchend"] {
        bag.listen(document.as_ref(), kind, false, handler(ctx, on_drag_end));
    }

    bag.listen(wrapper.as_ref(), "wheel", false, handler(ctx, on_wheel));

    for kind in ["click", "mousedown"] {
        bag.listen(book.as_ref(), kind, true, handler(ctx, on_book_capture));
    }
    bag.listen(book.as_ref(), "contextmenu", false, handler(ctx, on_context_menu));

    clog("interaction listeners registered");
}
