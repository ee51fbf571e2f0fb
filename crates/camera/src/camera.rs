use crate::config::FreeCamConfig;
use glam::{Vec2, Vec3};

/// Movement requested by held keys and stick deflection, in camera-local
/// terms: `x` right, `y` up, `z` forward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
    /// Analog strafe (`x`) and forward (`y`) from a stick.
    pub stick: Vec2,
    /// Analog look rate from a stick; `x` turns right, `y` looks down.
    pub look: Vec2,
}

impl MoveIntent {
    fn local(&self) -> Vec3 {
        Vec3::new(
            self.right - self.left + self.stick.x,
            self.up - self.down,
            self.forward - self.back + self.stick.y,
        )
    }
}

/// Fly camera with position, yaw and pitch (radians).
/// `yaw` grows to the right; `pitch` grows upward and is clamped.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub look_speed: f32,
    pub pitch_limit: f32,
    pub intent: MoveIntent,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(&FreeCamConfig::default())
    }
}

impl FlyCamera {
    pub fn new(config: &FreeCamConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 5.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            speed: config.move_speed,
            look_speed: config.stick_look_speed,
            pitch_limit: config.pitch_limit,
            intent: MoveIntent::default(),
        }
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.heading() * cos_pitch + Vec3::Y * sin_pitch
    }

    /// Unit strafe direction, always horizontal.
    pub fn right(&self) -> Vec3 {
        let heading = self.heading();
        Vec3::new(-heading.z, 0.0, heading.x)
    }

    /// Horizontal unit vector the camera faces, ignoring pitch.
    fn heading(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    /// Yaw around world up. Positive turns right.
    pub fn turn(&mut self, radians: f32) {
        self.yaw += radians;
    }

    /// Pitch around the camera's right axis, clamped to `±pitch_limit`.
    /// Positive looks up.
    pub fn tilt(&mut self, radians: f32) {
        self.pitch = (self.pitch + radians).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Move along the view direction; negative moves back.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Integrate the current intent over `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let local = self.intent.local();
        if local != Vec3::ZERO {
            let world = self.right() * local.x + Vec3::Y * local.y + self.forward() * local.z;
            self.position += world * self.speed * dt;
        }

        let look = self.intent.look;
        if look != Vec2::ZERO {
            self.turn(look.x * self.look_speed * dt);
            self.tilt(-look.y * self.look_speed * dt);
        }
    }
}
