// Zoom/pan state for the book surface, extracted so the gesture and zoom
// handlers share one source of truth.

pub const ZOOM_STEP: f64 = 0.25;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.5;

/// Visual transform applied to the book: a zoom factor plus a pan offset
/// expressed in pre-scale (content) pixels.
///
/// Invariants: `zoom` stays within `[MIN_ZOOM, MAX_ZOOM]`, and the pan offset
/// is zero whenever `zoom <= 1` (panning is only meaningful once the book
/// overflows the viewport).
#[derive(Debug, Clone)]
pub struct Transform {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Result of a successful zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomChange {
    /// True exactly when this step crossed from `zoom <= 1` to `zoom > 1`,
    /// i.e. the moment panning becomes available.
    pub entered_pan_range: bool,
}

impl Transform {
    /// Increase zoom by one step, clamped to `MAX_ZOOM`.
    /// Returns `None` when already at the upper bound.
    pub fn zoom_in(&mut self) -> Option<ZoomChange> {
        if self.zoom >= MAX_ZOOM {
            return None;
        }
        let previous = self.zoom;
        self.set_zoom(self.zoom + ZOOM_STEP);
        Some(ZoomChange {
            entered_pan_range: previous <= 1.0 && self.zoom > 1.0,
        })
    }

    /// Decrease zoom by one step, clamped to `MIN_ZOOM`.
    /// Returns `None` when already at the lower bound.
    pub fn zoom_out(&mut self) -> Option<ZoomChange> {
        if self.zoom <= MIN_ZOOM {
            return None;
        }
        self.set_zoom(self.zoom - ZOOM_STEP);
        Some(ZoomChange {
            entered_pan_range: false,
        })
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if self.zoom <= 1.0 {
            self.pan_x = 0.0;
            self.pan_y = 0.0;
        }
    }

    /// Callers must only pan while `pannable()`; the drag session enforces it.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pannable(&self) -> bool {
        self.zoom > 1.0
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// CSS transform value. Scale is applied before translation so the pan
    /// offset is interpreted in content pixels, keeping drag-to-pan feel
    /// proportional to content size at any zoom level.
    pub fn css_value(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_stay_in_bounds() {
        let mut t = Transform::default();
        for _ in 0..20 {
            t.zoom_in();
            assert!(t.zoom <= MAX_ZOOM);
        }
        assert_eq!(t.zoom, MAX_ZOOM);
        for _ in 0..20 {
            t.zoom_out();
            assert!(t.zoom >= MIN_ZOOM);
        }
        assert_eq!(t.zoom, MIN_ZOOM);
    }

    #[test]
    fn zoom_changes_by_exactly_one_step() {
        let mut t = Transform::default();
        let before = t.zoom;
        assert!(t.zoom_in().is_some());
        assert_eq!(t.zoom, before + ZOOM_STEP);
        assert!(t.zoom_out().is_some());
        assert_eq!(t.zoom, before);
    }

    #[test]
    fn zoom_at_bound_is_a_noop() {
        let mut t = Transform {
            zoom: MAX_ZOOM,
            ..Transform::default()
        };
        assert!(t.zoom_in().is_none());
        assert_eq!(t.zoom, MAX_ZOOM);

        let mut t = Transform {
            zoom: MIN_ZOOM,
            ..Transform::default()
        };
        assert!(t.zoom_out().is_none());
        assert_eq!(t.zoom, MIN_ZOOM);
    }

    #[test]
    fn pan_resets_when_zoom_returns_to_unity() {
        let mut t = Transform::default();
        t.zoom_in(); // 1.25
        t.set_pan(40.0, -12.5);
        t.zoom_out(); // back to 1.0
        assert_eq!(t.zoom, 1.0);
        assert_eq!((t.pan_x, t.pan_y), (0.0, 0.0));
    }

    #[test]
    fn hint_fires_once_on_crossing_above_unity() {
        let mut t = Transform::default();
        let crossings: Vec<bool> = (0..3)
            .map(|_| t.zoom_in().unwrap().entered_pan_range)
            .collect();
        assert_eq!(t.zoom, 1.75);
        assert_eq!(crossings, vec![true, false, false]);
    }

    #[test]
    fn zoom_out_never_reports_a_crossing() {
        let mut t = Transform {
            zoom: 1.25,
            ..Transform::default()
        };
        while let Some(change) = t.zoom_out() {
            assert!(!change.entered_pan_range);
        }
    }

    #[test]
    fn percent_is_rounded() {
        let t = Transform {
            zoom: 1.25,
            ..Transform::default()
        };
        assert_eq!(t.zoom_percent(), 125);
        let t = Transform {
            zoom: 0.5,
            ..Transform::default()
        };
        assert_eq!(t.zoom_percent(), 50);
    }

    #[test]
    fn css_applies_scale_before_translate() {
        let t = Transform {
            zoom: 2.0,
            pan_x: 10.0,
            pan_y: -4.0,
        };
        assert_eq!(t.css_value(), "scale(2) translate(10px, -4px)");
    }
}
