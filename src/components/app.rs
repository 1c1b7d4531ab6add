use yew::prelude::*;

use super::viewer::BookView;

/// Document served next to the app bundle.
const PDF_URL: &str = "book.pdf";

#[function_component(App)]
pub fn app() -> Html {
    html! { <BookView src={PDF_URL} /> }
}
