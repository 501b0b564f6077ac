//! A fixed look-at camera.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const FALLBACK_ASPECT: f32 = 4.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(50.0, 100.0, 200.0),
            target: Vec3::new(0.0, 80.0, 0.0),
            up: Vec3::Y,
            fov_y: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Perspective projection for a viewport of `width` by `height` pixels.
    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), aspect(width, height), self.near, self.far)
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        FALLBACK_ASPECT
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4Swizzles;

    use super::*;

    #[test]
    fn test_target_is_straight_ahead() {
        let camera = Camera::default();
        let in_view = camera.view() * camera.target.extend(1.0);
        let distance = (camera.target - camera.position).length();
        assert!(in_view.x.abs() < 1e-3);
        assert!(in_view.y.abs() < 1e-3);
        assert!((in_view.z + distance).abs() < 1e-2);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = Camera::default();
        let clip = camera.projection(1024, 768) * camera.view() * camera.target.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_zero_height_falls_back() {
        let camera = Camera::default();
        assert_eq!(camera.projection(800, 0), camera.projection(4, 3));
        assert_eq!(aspect(1024, 768), FALLBACK_ASPECT);
    }
}
