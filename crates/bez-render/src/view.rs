use bez_math::{Aabb3, Color, DMat4, DVec2, DVec3};
use bez_mesh::ShadingMode;
use serde::{Deserialize, Serialize};

/// Degrees turned per rotate key press.
pub const ROTATION_STEP: f64 = 1.0;
/// Distance moved per pan or zoom key press.
pub const TRANSLATION_STEP: f64 = 0.4;
/// Degrees turned per pixel of left-button drag.
pub const DRAG_ROTATION_FACTOR: f64 = 0.5;
/// Distance moved per pixel of middle-button drag.
pub const DRAG_TRANSLATION_FACTOR: f64 = 0.05;

/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f64 = 45.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const FAR_PLANE: f64 = 100.0;

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonMode {
    #[default]
    Filled,
    /// Edges only, unlit.
    Wireframe,
    /// Faces filled with the background color, edges drawn on top.
    HiddenLine,
}

/// Mouse buttons held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragButtons {
    pub left: bool,
    pub middle: bool,
}

/// A single user interaction applied to a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    ToggleShading,
    ToggleWireframe,
    ToggleHiddenLine,
    /// Pointer moved by `(dx, dy)` pixels with `buttons` held.
    Drag { buttons: DragButtons, dx: f64, dy: f64 },
}

impl ViewCommand {
    /// Command bound to a character key: `s`, `w`, `h`, `=` and `-`.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(ViewCommand::ToggleShading),
            'w' => Some(ViewCommand::ToggleWireframe),
            'h' => Some(ViewCommand::ToggleHiddenLine),
            '=' | '+' => Some(ViewCommand::ZoomIn),
            '-' => Some(ViewCommand::ZoomOut),
            _ => None,
        }
    }
}

/// Everything the renderer needs besides the model.
///
/// Commands never mutate a state in place; [`ViewState::apply`] returns the
/// next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Rotation about the x axis, degrees
    pub rotation_x: f64,
    /// Rotation about the y axis, degrees
    pub rotation_y: f64,
    /// Screen-plane offset applied before rotation
    pub translation: DVec2,
    /// Distance from the eye along -z
    pub zoom: f64,
    pub shading: ShadingMode,
    pub polygon_mode: PolygonMode,
    pub light_color: Color,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.001,
            translation: DVec2::ZERO,
            zoom: 15.0,
            shading: ShadingMode::Flat,
            polygon_mode: PolygonMode::Filled,
            light_color: Color::RED,
        }
    }
}

impl ViewState {
    pub fn with_light_color(mut self, color: Color) -> Self {
        self.light_color = color;
        self
    }

    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    /// The state after `command`.
    pub fn apply(self, command: ViewCommand) -> Self {
        let mut next = self;
        match command {
            ViewCommand::RotateLeft => next.rotation_y -= ROTATION_STEP,
            ViewCommand::RotateRight => next.rotation_y += ROTATION_STEP,
            ViewCommand::RotateUp => next.rotation_x -= ROTATION_STEP,
            ViewCommand::RotateDown => next.rotation_x += ROTATION_STEP,
            ViewCommand::PanLeft => next.translation.x -= TRANSLATION_STEP,
            ViewCommand::PanRight => next.translation.x += TRANSLATION_STEP,
            ViewCommand::PanUp => next.translation.y += TRANSLATION_STEP,
            ViewCommand::PanDown => next.translation.y -= TRANSLATION_STEP,
            ViewCommand::ZoomIn => next.zoom -= TRANSLATION_STEP,
            ViewCommand::ZoomOut => next.zoom += TRANSLATION_STEP,
            ViewCommand::ToggleShading => next.shading = self.shading.toggled(),
            ViewCommand::ToggleWireframe => {
                next.polygon_mode = match self.polygon_mode {
                    PolygonMode::Wireframe => PolygonMode::Filled,
                    _ => PolygonMode::Wireframe,
                }
            }
            ViewCommand::ToggleHiddenLine => {
                next.polygon_mode = match self.polygon_mode {
                    PolygonMode::HiddenLine => PolygonMode::Filled,
                    _ => PolygonMode::HiddenLine,
                }
            }
            ViewCommand::Drag { buttons, dx, dy } => match (buttons.left, buttons.middle) {
                (true, true) => next.zoom -= DRAG_TRANSLATION_FACTOR * dx,
                (true, false) => {
                    next.rotation_x += DRAG_ROTATION_FACTOR * dy;
                    next.rotation_y += DRAG_ROTATION_FACTOR * dx;
                }
                (false, true) => {
                    next.translation.x += DRAG_TRANSLATION_FACTOR * dx;
                    next.translation.y -= DRAG_TRANSLATION_FACTOR * dy;
                }
                (false, false) => {}
            },
        }
        next
    }

    /// Apply commands in order.
    pub fn apply_all<I>(self, commands: I) -> Self
    where
        I: IntoIterator<Item = ViewCommand>,
    {
        commands.into_iter().fold(self, Self::apply)
    }

    /// Centre `bounds` on screen and pull the eye back far enough that it
    /// fills the field of view.
    pub fn framed(mut self, bounds: &Aabb3) -> Self {
        let center = bounds.center();
        let size = bounds.extents();
        let max_dim = size.x.max(size.y).max(size.z);
        let distance = max_dim / (2.0 * (FOV_Y_DEGREES.to_radians() / 2.0).tan());
        self.translation = -center.truncate();
        self.zoom = distance * 1.5 + center.z;
        self
    }

    /// `translate(0, 0, -zoom) · translate(tx, ty, 0) · Rx · Ry`.
    pub fn model_view(&self) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, -self.zoom))
            * DMat4::from_translation(self.translation.extend(0.0))
            * DMat4::from_rotation_x(self.rotation_x.to_radians())
            * DMat4::from_rotation_y(self.rotation_y.to_radians())
    }

    /// Perspective projection for a `width × height` viewport.
    pub fn projection(&self, width: u32, height: u32) -> DMat4 {
        // A minimised window reports zero height.
        let aspect = width.max(1) as f64 / height.max(1) as f64;
        DMat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 15.0);
        assert_eq!(view.rotation_y, 0.001);
        assert_eq!(view.shading, ShadingMode::Flat);
        assert_eq!(view.polygon_mode, PolygonMode::Filled);
        assert_eq!(view.light_color, Color::RED);
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let view = ViewState::default();
        let next = view.apply(ViewCommand::RotateRight);
        assert_eq!(view, ViewState::default());
        assert_abs_diff_eq!(next.rotation_y, 1.001, epsilon = 1e-12);
    }

    #[test]
    fn test_key_steps() {
        let view = ViewState::default().apply_all([
            ViewCommand::RotateDown,
            ViewCommand::RotateDown,
            ViewCommand::PanRight,
            ViewCommand::PanDown,
            ViewCommand::ZoomIn,
        ]);
        assert_abs_diff_eq!(view.rotation_x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(view.translation.x, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(view.translation.y, -0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(view.zoom, 14.6, epsilon = 1e-12);
    }

    #[test]
    fn test_toggles() {
        let view = ViewState::default();
        let shaded = view.apply(ViewCommand::ToggleShading);
        assert_eq!(shaded.shading, ShadingMode::Smooth);
        assert_eq!(shaded.apply(ViewCommand::ToggleShading).shading, ShadingMode::Flat);

        let wire = view.apply(ViewCommand::ToggleWireframe);
        assert_eq!(wire.polygon_mode, PolygonMode::Wireframe);
        assert_eq!(
            wire.apply(ViewCommand::ToggleHiddenLine).polygon_mode,
            PolygonMode::HiddenLine
        );
        assert_eq!(
            wire.apply(ViewCommand::ToggleWireframe).polygon_mode,
            PolygonMode::Filled
        );
    }

    #[test]
    fn test_drag() {
        let view = ViewState::default();
        let left = DragButtons { left: true, middle: false };
        let middle = DragButtons { left: false, middle: true };
        let both = DragButtons { left: true, middle: true };

        let rotated = view.apply(ViewCommand::Drag { buttons: left, dx: 10.0, dy: 4.0 });
        assert_abs_diff_eq!(rotated.rotation_x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.rotation_y, 5.001, epsilon = 1e-12);

        let panned = view.apply(ViewCommand::Drag { buttons: middle, dx: 10.0, dy: 4.0 });
        assert_abs_diff_eq!(panned.translation.x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(panned.translation.y, -0.2, epsilon = 1e-12);

        let zoomed = view.apply(ViewCommand::Drag { buttons: both, dx: 20.0, dy: 0.0 });
        assert_abs_diff_eq!(zoomed.zoom, 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(ViewCommand::from_key('s'), Some(ViewCommand::ToggleShading));
        assert_eq!(ViewCommand::from_key('='), Some(ViewCommand::ZoomIn));
        assert_eq!(ViewCommand::from_key('-'), Some(ViewCommand::ZoomOut));
        assert_eq!(ViewCommand::from_key('c'), None);
    }

    #[test]
    fn test_model_view_places_origin_in_front_of_eye() {
        let view = ViewState::default().apply(ViewCommand::PanRight);
        let p = view.model_view().transform_point3(DVec3::ZERO);
        assert_abs_diff_eq!(p.x, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, -15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_is_applied_y_first() {
        let view = ViewState {
            rotation_x: 90.0,
            rotation_y: 90.0,
            zoom: 0.0,
            ..ViewState::default()
        };
        // Ry takes +x to -z, then Rx takes -z to +y.
        let p = view.model_view().transform_point3(DVec3::X);
        assert!((p - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_projection() {
        let view = ViewState::default();
        let proj = view.projection(800, 600);
        let f = 1.0 / (22.5f64.to_radians()).tan();
        assert_abs_diff_eq!(proj.y_axis.y, f, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.x_axis.x, f * 600.0 / 800.0, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.z_axis.w, -1.0, epsilon = 1e-12);
        // Zero height does not divide by zero.
        assert!(view.projection(800, 0).is_finite());
    }

    #[test]
    fn test_framed_centres_offset_model() {
        let bounds = Aabb3::new(DVec3::new(98.0, 48.0, -2.0), DVec3::new(102.0, 52.0, 2.0));
        let view = ViewState::default().framed(&bounds);
        assert_eq!(view.translation, DVec2::new(-100.0, -50.0));

        let p = view.model_view().transform_point3(bounds.center());
        assert!(p.x.abs() < 1e-6, "x = {}", p.x);
        assert!(p.y.abs() < 1e-6, "y = {}", p.y);
        assert!(p.z < -NEAR_PLANE);
    }

    #[test]
    fn test_framed_backs_off_for_large_models() {
        let small = Aabb3::new(DVec3::splat(-1.0), DVec3::splat(1.0));
        let large = Aabb3::new(DVec3::splat(-10.0), DVec3::splat(10.0));
        let view = ViewState::default();
        assert!(view.framed(&large).zoom > view.framed(&small).zoom);
        assert!(view.framed(&small).zoom > 2.0);
    }
}
