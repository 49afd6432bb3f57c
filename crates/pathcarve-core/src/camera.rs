//! Camera: screen-space to document user-space transforms.

use crate::document::ViewBox;
use crate::zoom;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the editor.
///
/// The forward transform places document content on screen by shifting the
/// active viewBox origin to zero, scaling by the zoom level, and applying
/// the pan offset. The inverse maps pointer input back into document user
/// space, exact to double precision, so a drag that visually tracks the
/// pointer maps to document coordinates that do the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// The document window currently mapped onto the screen.
    pub view_box: ViewBox,
}

impl Camera {
    /// Create a camera over a viewBox at zoom 1 and no pan.
    pub fn new(view_box: ViewBox) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: zoom::DEFAULT_ZOOM,
            view_box,
        }
    }

    /// The affine transform from user space to screen space.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset)
            * Affine::scale(self.zoom)
            * Affine::translate(Vec2::new(-self.view_box.x, -self.view_box.y))
    }

    /// The affine transform from screen space to user space.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(Vec2::new(self.view_box.x, self.view_box.y))
            * Affine::scale(1.0 / self.zoom)
            * Affine::translate(-self.offset)
    }

    /// Convert a screen point to document user-space coordinates.
    pub fn screen_to_user(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a document user-space point to screen coordinates.
    pub fn user_to_screen(&self, user_point: Point) -> Point {
        self.transform() * user_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = zoom::clamp_level(self.zoom * factor);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let user_point = self.screen_to_user(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so user_point stays at screen_point.
        let new_screen = self.user_to_screen(user_point);
        self.offset += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_with(view_box: ViewBox, zoom: f64, offset: Vec2) -> Camera {
        let mut camera = Camera::new(view_box);
        camera.zoom = zoom;
        camera.offset = offset;
        camera
    }

    #[test]
    fn test_identity_at_origin_view_box() {
        let camera = Camera::new(ViewBox::new(0.0, 0.0, 200.0, 200.0));
        let screen = Point::new(100.0, 50.0);
        let user = camera.screen_to_user(screen);
        assert!((user.x - screen.x).abs() < f64::EPSILON);
        assert!((user.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_box_origin_shift() {
        let camera = Camera::new(ViewBox::new(10.0, 20.0, 100.0, 100.0));
        let user = camera.screen_to_user(Point::new(0.0, 0.0));
        assert!((user.x - 10.0).abs() < f64::EPSILON);
        assert!((user.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_scales_screen_deltas() {
        let camera = camera_with(ViewBox::new(0.0, 0.0, 100.0, 100.0), 2.0, Vec2::ZERO);
        let user = camera.screen_to_user(Point::new(100.0, 200.0));
        assert!((user.x - 50.0).abs() < f64::EPSILON);
        assert!((user.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_at_combined_transform() {
        let camera = camera_with(
            ViewBox::new(10.0, -5.0, 80.0, 40.0),
            1.5,
            Vec2::new(30.0, -20.0),
        );

        let original = Point::new(123.0, 456.0);
        let user = camera.screen_to_user(original);
        let back = camera.user_to_screen(user);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_screen_point_fixed() {
        let mut camera = camera_with(
            ViewBox::new(5.0, 5.0, 100.0, 100.0),
            1.0,
            Vec2::new(12.0, 34.0),
        );
        let anchor = Point::new(60.0, 80.0);
        let user_before = camera.screen_to_user(anchor);

        camera.zoom_at(anchor, 2.0);

        let user_after = camera.screen_to_user(anchor);
        assert!((user_after.x - user_before.x).abs() < 1e-10);
        assert!((user_after.y - user_before.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_clamps_to_controller_bounds() {
        let mut camera = Camera::new(ViewBox::new(0.0, 0.0, 100.0, 100.0));
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - zoom::MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom = 1.0;
        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - zoom::MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new(ViewBox::new(0.0, 0.0, 100.0, 100.0));
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
