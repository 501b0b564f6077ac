//! Light sources used by the lit shader.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The lit shader has room for this many spotlights.
pub const MAX_SPOT_LIGHTS: usize = 4;

/// An omnidirectional light with distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub position: Vec3,
    /// Constant, linear and quadratic attenuation factors.
    pub attenuation: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-50.0, 0.0, 300.0),
            attenuation: Vec3::new(1.0, 0.007e-4, 0.0002e-4),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::ONE,
        }
    }
}

/// A cone light. `cutoff` is the cosine of the cone's half-angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLight {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub attenuation: Vec3,
    pub position: Vec3,
    pub direction: Vec3,
    pub cutoff: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::ONE,
            attenuation: Vec3::new(1.0, 0.35, 0.44),
            position: Vec3::new(0.0, 200.0, 0.0),
            direction: Vec3::NEG_Y,
            cutoff: 30.0f32.to_radians().cos(),
        }
    }
}

impl SpotLight {
    /// Sets the cone half-angle in degrees.
    pub fn with_cutoff_degrees(mut self, degrees: f32) -> Self {
        self.cutoff = degrees.to_radians().cos();
        self
    }

    /// Red, green and blue spotlights hanging above the origin and pointing
    /// down at different spots.
    pub fn rgb_trio() -> [SpotLight; 3] {
        let base = SpotLight::default().with_cutoff_degrees(30.0);
        [
            SpotLight {
                diffuse: Vec3::X,
                direction: Vec3::new(50.0, -200.0, 50.0),
                ..base
            },
            SpotLight {
                diffuse: Vec3::Y,
                direction: Vec3::new(-50.0, -200.0, -50.0),
                ..base
            },
            SpotLight {
                diffuse: Vec3::Z,
                direction: Vec3::new(0.0, -200.0, 50.0),
                ..base
            },
        ]
    }
}

/// Moves a light around the Y axis, one step per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightOrbit {
    pub theta: f32,
    /// Radians added every frame.
    pub step: f32,
    pub radius: f32,
    pub height: f32,
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self {
            theta: 0.0,
            step: 0.05,
            radius: 150.0,
            height: 100.0,
        }
    }
}

impl LightOrbit {
    /// Returns the position for the current angle.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.theta.sin() * self.radius,
            self.height,
            self.theta.cos() * self.radius,
        )
    }

    /// Returns the current position and moves on to the next step.
    pub fn advance(&mut self) -> Vec3 {
        let position = self.position();
        // theta stays within one turn, whichever way the light moves.
        self.theta = (self.theta + self.step).rem_euclid(std::f32::consts::TAU);
        position
    }
}
