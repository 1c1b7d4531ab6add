pub mod drag;
pub mod transform;

pub use drag::DragSession;
pub use transform::Transform;
