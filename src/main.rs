mod components;
mod loader;
mod pageflip;
mod pdfjs;
mod presenter;
mod state;
mod util;

use components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
