//! Respawn / safety net
//!
//! Falling faster than the configured speed means the jump failed. The
//! player goes back to where they last stood.

use crate::math::Vec3;
use crate::world::PhysicsSettings;
use super::player::Player;

#[derive(Debug, Clone)]
pub struct Safety {
    last_grounded: Vec3,
}

impl Safety {
    pub fn new(spawn: Vec3) -> Self {
        Self { last_grounded: spawn }
    }

    pub fn last_grounded(&self) -> Vec3 {
        self.last_grounded
    }

    pub fn record(&mut self, player: &Player) {
        if player.grounded {
            self.last_grounded = player.position;
        }
    }

    /// Teleport the player back if they are falling too fast.
    /// Returns the (from, to) pair of the teleport when it happened
    pub fn check(&self, player: &mut Player, physics: &PhysicsSettings) -> Option<(Vec3, Vec3)> {
        if player.vertical_velocity >= -physics.respawn_fall_speed {
            return None;
        }
        let from = player.position;
        player.teleport(self.last_grounded);
        Some((from, self.last_grounded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_only_while_grounded() {
        let mut safety = Safety::new(Vec3::ZERO);
        let mut player = Player::new(Vec3::new(1.0, 2.0, 3.0));
        safety.record(&player);
        assert_eq!(safety.last_grounded(), Vec3::ZERO);

        player.grounded = true;
        safety.record(&player);
        assert_eq!(safety.last_grounded(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_fast_fall_teleports_home() {
        let physics = PhysicsSettings::default();
        let safety = Safety::new(Vec3::new(2.0, 0.0, 2.0));
        let mut player = Player::new(Vec3::new(5.0, -30.0, 5.0));
        player.vertical_velocity = -0.7;
        player.horizontal_velocity = 0.3;

        let teleport = safety.check(&mut player, &physics);
        assert_eq!(teleport, Some((Vec3::new(5.0, -30.0, 5.0), Vec3::new(2.0, 0.0, 2.0))));
        assert_eq!(player.position, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(player.vertical_velocity, 0.0);
        assert_eq!(player.horizontal_velocity, 0.0);
    }

    #[test]
    fn test_normal_fall_is_safe() {
        let physics = PhysicsSettings::default();
        let safety = Safety::new(Vec3::ZERO);
        let mut player = Player::new(Vec3::new(0.0, -3.0, 0.0));
        player.vertical_velocity = -0.6;
        assert_eq!(safety.check(&mut player, &physics), None);
        assert_eq!(player.position.y, -3.0);
    }
}
