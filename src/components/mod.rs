pub mod app;
pub mod viewer;
pub mod zoom_controls;

pub use app::App;
