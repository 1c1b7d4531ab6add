use super::Transform;

/// Ephemeral record of one pan gesture: the pointer position and pan offset at
/// the moment the drag started. Lives between a start event and its matching
/// end event; any end event resets it.
#[derive(Default, Debug, Clone)]
pub struct DragSession {
    active: bool,
    start_x: f64,
    start_y: f64,
    start_pan_x: f64,
    start_pan_y: f64,
}

impl DragSession {
    /// Start a drag at the given pointer position. Refused (returns false)
    /// unless the transform is zoomed past 100%.
    pub fn begin(&mut self, point: (f64, f64), transform: &Transform) -> bool {
        if !transform.pannable() {
            return false;
        }
        self.active = true;
        self.start_x = point.0;
        self.start_y = point.1;
        self.start_pan_x = transform.pan_x;
        self.start_pan_y = transform.pan_y;
        true
    }

    /// Advance the drag to a new pointer position, updating the pan offset.
    /// The screen-space delta is scaled by `1/zoom` so the content tracks the
    /// pointer 1:1 visually at any zoom level. No-op while idle.
    pub fn update(&self, point: (f64, f64), transform: &mut Transform) -> bool {
        if !self.active || !transform.pannable() {
            return false;
        }
        let dx = point.0 - self.start_x;
        let dy = point.1 - self.start_y;
        transform.set_pan(
            self.start_pan_x + dx / transform.zoom,
            self.start_pan_y + dy / transform.zoom,
        );
        true
    }

    /// End the drag. Always clears the session, even if no start was seen;
    /// returns whether a drag was actually in progress.
    pub fn finish(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoomed(zoom: f64) -> Transform {
        Transform {
            zoom,
            ..Transform::default()
        }
    }

    #[test]
    fn begin_is_refused_at_or_below_unity_zoom() {
        let mut drag = DragSession::default();
        assert!(!drag.begin((10.0, 10.0), &zoomed(1.0)));
        assert!(!drag.is_active());
        assert!(!drag.begin((10.0, 10.0), &zoomed(0.5)));
        assert!(!drag.is_active());
    }

    #[test]
    fn move_while_idle_never_mutates_pan() {
        let drag = DragSession::default();
        let mut t = zoomed(2.0);
        assert!(!drag.update((100.0, 100.0), &mut t));
        assert_eq!((t.pan_x, t.pan_y), (0.0, 0.0));
    }

    #[test]
    fn drag_delta_is_scaled_by_inverse_zoom() {
        let mut drag = DragSession::default();
        let mut t = zoomed(2.0);
        assert!(drag.begin((0.0, 0.0), &t));
        assert!(drag.update((100.0, 0.0), &mut t));
        assert_eq!((t.pan_x, t.pan_y), (50.0, 0.0));
    }

    #[test]
    fn drag_accumulates_from_the_starting_pan() {
        let mut drag = DragSession::default();
        let mut t = zoomed(1.25);
        t.set_pan(8.0, -4.0);
        assert!(drag.begin((50.0, 50.0), &t));
        assert!(drag.update((60.0, 30.0), &mut t));
        assert_eq!(t.pan_x, 8.0 + 10.0 / 1.25);
        assert_eq!(t.pan_y, -4.0 + (-20.0) / 1.25);
    }

    #[test]
    fn moves_are_absolute_against_the_session_start() {
        // Two moves from the same session must not compound.
        let mut drag = DragSession::default();
        let mut t = zoomed(2.0);
        drag.begin((0.0, 0.0), &t);
        drag.update((100.0, 0.0), &mut t);
        drag.update((100.0, 0.0), &mut t);
        assert_eq!(t.pan_x, 50.0);
    }

    #[test]
    fn end_without_start_leaves_state_unchanged() {
        let mut drag = DragSession::default();
        let t_before = zoomed(2.0);
        let mut t = t_before.clone();
        assert!(!drag.finish());
        drag.update((30.0, 30.0), &mut t);
        assert_eq!((t.zoom, t.pan_x, t.pan_y), (2.0, 0.0, 0.0));
    }

    #[test]
    fn finish_resets_the_session() {
        let mut drag = DragSession::default();
        let mut t = zoomed(2.0);
        drag.begin((0.0, 0.0), &t);
        assert!(drag.finish());
        assert!(!drag.is_active());
        assert!(!drag.update((10.0, 10.0), &mut t));
    }
}
