// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed perspective camera the ribbon is viewed through.

use kurbo::Size;
use ribbon_core::layout::{CAMERA_DISTANCE, CAMERA_FOV_DEGREES, viewport_for_screen};

use crate::transform::Transform3d;

/// Near clip plane distance.
pub const NEAR: f64 = 0.1;

/// Far clip plane distance.
pub const FAR: f64 = 100.0;

/// A perspective camera on the +Z axis looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Distance from the origin along +Z.
    pub distance: f64,
    /// Width over height of the drawing surface.
    pub aspect: f64,
}

impl Camera {
    /// Creates the gallery camera for a drawing surface of `screen` CSS
    /// pixels. A degenerate screen gets an aspect of 1.
    #[must_use]
    pub fn for_screen(screen: Size) -> Self {
        let aspect = if screen.width > 0.0 && screen.height > 0.0 {
            screen.width / screen.height
        } else {
            1.0
        };
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            distance: CAMERA_DISTANCE,
            aspect,
        }
    }

    /// Size of the `z = 0` plane visible through this camera.
    #[must_use]
    pub fn viewport(&self) -> Size {
        viewport_for_screen(Size::new(self.aspect, 1.0))
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view(&self) -> Transform3d {
        Transform3d::from_translation(0.0, 0.0, -self.distance)
    }

    /// View-to-clip transform.
    #[must_use]
    pub fn projection(&self) -> Transform3d {
        Transform3d::perspective(self.fov_degrees.to_radians(), self.aspect, NEAR, FAR)
    }

    /// World-to-clip transform.
    #[must_use]
    pub fn view_projection(&self) -> Transform3d {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ndc(camera: &Camera, x: f64, y: f64) -> (f64, f64) {
        let clip = camera.view_projection().transform_point([x, y, 0.0, 1.0]);
        (clip[0] / clip[3], clip[1] / clip[3])
    }

    #[test]
    fn viewport_edges_land_on_clip_edges() {
        let camera = Camera::for_screen(Size::new(1200.0, 600.0));
        let vp = camera.viewport();
        let (x, _) = ndc(&camera, vp.width * 0.5, 0.0);
        let (_, y) = ndc(&camera, 0.0, -vp.height * 0.5);
        assert!((x - 1.0).abs() < 1e-9, "right edge maps to +1, got {x}");
        assert!((y + 1.0).abs() < 1e-9, "bottom edge maps to -1, got {y}");
    }

    #[test]
    fn viewport_matches_layout() {
        let screen = Size::new(900.0, 700.0);
        let camera = Camera::for_screen(screen);
        let a = camera.viewport();
        let b = viewport_for_screen(screen);
        assert!((a.width - b.width).abs() < 1e-9, "widths agree");
        assert!((a.height - b.height).abs() < 1e-9, "heights agree");
    }

    #[test]
    fn degenerate_screen_is_square() {
        assert_eq!(Camera::for_screen(Size::ZERO).aspect, 1.0);
    }
}
