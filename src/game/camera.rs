//! Camera basis, screen-space projection and follow easing
//!
//! The camera only ever looks horizontally. Its angle picks a right/forward
//! pair on the XZ plane; Y stays world up. Collision and movement happen in
//! this basis, never in raw world axes.

use crate::math::Vec3;
use crate::world::PhysicsSettings;

/// Orthonormal screen basis embedded in world XZ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Screen X: (cos θ, 0, sin θ)
    pub right: Vec3,
    /// Screen depth, right rotated +90°: (−sin θ, 0, cos θ)
    pub forward: Vec3,
}

/// A point expressed relative to an origin on the camera axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl CameraBasis {
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let right = Vec3::flat(cos, sin);
        Self {
            right,
            forward: Vec3::flat(-right.z, right.x),
        }
    }

    /// Project `point` relative to `origin` onto (right, up, forward)
    pub fn project(&self, origin: Vec3, point: Vec3) -> ScreenPoint {
        let rel = point - origin;
        ScreenPoint {
            x: rel.dot(self.right),
            y: rel.y,
            depth: rel.dot(self.forward),
        }
    }

    /// Depth of a world point along forward (larger = farther from the viewer)
    pub fn depth_of(&self, point: Vec3) -> f32 {
        point.dot(self.forward)
    }

    /// World-space offset for a screen-space (x, y, depth) displacement
    pub fn to_world(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        self.right * x + Vec3::UP * y + self.forward * depth
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_angle(0.0)
    }
}

/// Follow camera
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Radians. A multiple of 90° whenever no shift is in flight
    pub angle: f32,
    /// World units across the view
    pub size: f32,
    /// Vertical easing factor; grows every tick and restarts on teleport
    pub since_teleport: f32,
    basis: CameraBasis,
}

impl Camera {
    pub fn new(target: Vec3, size: f32) -> Self {
        Self {
            position: target,
            angle: 0.0,
            size,
            since_teleport: 0.0,
            basis: CameraBasis::default(),
        }
    }

    /// Basis computed by the last `update_basis` call
    pub fn basis(&self) -> CameraBasis {
        self.basis
    }

    pub fn update_basis(&mut self) {
        self.basis = CameraBasis::from_angle(self.angle);
    }

    pub fn advance_timers(&mut self, physics: &PhysicsSettings) {
        self.since_teleport += physics.teleport_ease_rate;
    }

    /// Ease toward the player. Y targets a point above the player so they
    /// sit below screen center, and only eases gradually right after a teleport
    pub fn follow(&mut self, player: Vec3, physics: &PhysicsSettings) {
        let k = physics.camera_follow;
        self.position.x += (player.x - self.position.x) * k;
        self.position.z += (player.z - self.position.z) * k;

        let target_y = player.y + physics.camera_lead * self.size;
        self.position.y += (target_y - self.position.y) * self.since_teleport.min(1.0);
    }

    pub fn reset_teleport_timer(&mut self) {
        self.since_teleport = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_basis_at_rest() {
        let basis = CameraBasis::from_angle(0.0);
        assert_eq!(basis.right, Vec3::flat(1.0, 0.0));
        assert_eq!(basis.forward, Vec3::flat(0.0, 1.0));
    }

    #[test]
    fn test_forward_is_right_rotated_quarter_turn() {
        for quarter in 0..4 {
            let basis = CameraBasis::from_angle(quarter as f32 * FRAC_PI_2);
            assert!(close(basis.right.dot(basis.forward), 0.0));
            assert!(close(basis.right.len(), 1.0));
            assert!(close(basis.forward.len(), 1.0));
        }
        let basis = CameraBasis::from_angle(FRAC_PI_2);
        assert!(close(basis.right.z, 1.0));
        assert!(close(basis.forward.x, -1.0));
    }

    #[test]
    fn test_project_relative_to_origin() {
        let basis = CameraBasis::from_angle(FRAC_PI_2);
        let p = basis.project(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 4.0, 6.0));
        assert!(close(p.x, 5.0));
        assert!(close(p.y, 3.0));
        assert!(close(p.depth, -2.0));

        let back = basis.to_world(p.x, p.y, p.depth);
        assert!(close(back.x, 2.0) && close(back.y, 3.0) && close(back.z, 5.0));
    }

    #[test]
    fn test_follow_eases_horizontally() {
        let physics = PhysicsSettings::default();
        let mut camera = Camera::new(Vec3::ZERO, physics.camera_size);
        camera.follow(Vec3::new(10.0, 0.0, -10.0), &physics);
        assert!(close(camera.position.x, 1.0));
        assert!(close(camera.position.z, -1.0));
    }

    #[test]
    fn test_vertical_easing_waits_after_teleport() {
        let physics = PhysicsSettings::default();
        let mut camera = Camera::new(Vec3::ZERO, physics.camera_size);
        camera.reset_teleport_timer();
        camera.follow(Vec3::new(0.0, 5.0, 0.0), &physics);
        assert_eq!(camera.position.y, 0.0);

        for _ in 0..200 {
            camera.advance_timers(&physics);
        }
        camera.follow(Vec3::new(0.0, 5.0, 0.0), &physics);
        assert!(close(camera.position.y, 5.0 + physics.camera_lead * physics.camera_size));
    }
}
