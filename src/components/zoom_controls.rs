use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    /// Current zoom rendered as a percentage, e.g. "125%".
    pub label: String,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
}

#[function_component(ZoomControls)]
pub fn zoom_controls(props: &ZoomControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="zoom-controls">
            <button id="zoom-out" onclick={zo} title="Zoom out">{"−"}</button>
            <span id="zoom-level">{ &props.label }</span>
            <button id="zoom-in" onclick={zi} title="Zoom in">{"+"}</button>
        </div>
    }
}
