use glam::{Quat, Vec3};

use crate::core::controller::{Button, Controller};
use crate::math::Pose;

pub const CAMERA_SPEED: f32 = 0.1;
pub const CAMERA_ROTATION_SPEED: f32 = 0.05;

#[derive(Default, Clone, Copy)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl MovementState {
    pub fn from_controller(controller: &dyn Controller) -> Self {
        Self {
            forward: controller.is_down(Button::KeyW),
            backward: controller.is_down(Button::KeyS),
            left: controller.is_down(Button::KeyA),
            right: controller.is_down(Button::KeyD),
            up: controller.is_down(Button::Space),
            down: controller.is_down(Button::Shift),
            rotate_left: controller.is_down(Button::KeyQ),
            rotate_right: controller.is_down(Button::KeyE),
        }
    }

    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            self.to_direction(self.forward, self.backward),
            self.to_direction(self.right, self.left),
            self.to_direction(self.up, self.down),
        )
    }

    const fn rotation_velocity(&self) -> f32 {
        self.to_direction(self.rotate_right, self.rotate_left)
    }
}

/// Free-flying viewport camera; its pose is what gets piloted onto the target
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement: MovementState,
}

impl FlyCamera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            movement: MovementState::default(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Orientation that maps +Z onto [`forward`](Self::forward)
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.pitch)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation())
    }

    /// Read input and advance one frame
    pub fn update(&mut self, controller: &dyn Controller) {
        self.movement = MovementState::from_controller(controller);
        let (fwd, right_dir, up_dir) = self.movement.velocity();

        let displacement = self.forward() * fwd * CAMERA_SPEED
            + self.right() * right_dir * CAMERA_SPEED
            + Vec3::Y * up_dir * CAMERA_SPEED;

        self.position += displacement;
        self.yaw += self.movement.rotation_velocity() * CAMERA_ROTATION_SPEED;
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 8.0, 15.0), std::f32::consts::PI, -0.6)
    }
}
