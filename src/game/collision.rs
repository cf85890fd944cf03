//! Collision System
//!
//! Screen-space collision between the player's unit cube and the level's
//! boxes. Every test runs on the camera axes (X along right, Y up, Z along
//! forward) and is predictive: the resolver looks at the move kinematics
//! proposes for this tick and returns the corrected deltas to apply.
//!
//! Boxes that overlap the player on screen are never pushed against
//! sideways. Instead the player is relocated along depth, in front of or
//! behind the box, so what the player can stand on depends on the camera.
//!
//! Per box, at most one of:
//! 1. Free-space bound: overlaps on screen (X and Y) but not in depth.
//!    Limits how far any other correction may move the player in depth.
//! 2. Ground: not overlapping Y now, would overlap after the move, falling.
//!    Candidate landing, with a depth nudge onto the footprint if needed.
//! 3. Wall: would overlap on screen after the move, at any depth short of
//!    being entirely behind the player. Candidate snap to a face.

use crate::math::Vec3;
use crate::world::{Platform, PLAYER_HALF_EXTENT};
use super::camera::CameraBasis;

/// Movement kinematics wants to make this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposedMove {
    /// Along camera right
    pub horizontal: f32,
    /// Along world Y
    pub vertical: f32,
    /// Fast-fall held: skip landings and fall past boxes
    pub drop_through: bool,
}

/// Half extents of a box grown by the player's half extent, on camera axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Thresholds {
    pub fn for_platform(platform: &Platform, basis: &CameraBasis) -> Self {
        let (width, length) = (platform.width, platform.length());
        let (rx, rz) = (basis.right.x.abs(), basis.right.z.abs());
        let projected_width = width * rx + length * rz;
        let projected_length = length * rx + width * rz;
        Self {
            x: projected_width / 2.0 + PLAYER_HALF_EXTENT,
            y: platform.height / 2.0 + PLAYER_HALF_EXTENT,
            z: projected_length / 2.0 + PLAYER_HALF_EXTENT,
        }
    }
}

/// Landing chosen for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the box in the iteration order passed to `resolve`
    pub platform: usize,
    /// World Y the player rests at
    pub y: f32,
}

/// Corrected movement for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub horizontal: f32,
    /// Ignored when `landing` is set
    pub vertical: f32,
    /// Along camera forward
    pub depth: f32,
    pub landing: Option<Landing>,
    /// A wall stopped horizontal motion
    pub blocked_horizontal: bool,
    /// A wall stopped upward motion
    pub blocked_vertical: bool,
}

#[derive(Debug, Clone, Copy)]
struct GroundCandidate {
    platform: usize,
    nudge: f32,
    top: f32,
}

impl GroundCandidate {
    /// Smaller depth nudge wins, then the higher top
    fn beats(&self, other: &GroundCandidate) -> bool {
        let (a, b) = (self.nudge.abs(), other.nudge.abs());
        a < b || (a == b && self.top > other.top)
    }
}

/// Per-tick scratch state. Every slot starts empty
#[derive(Debug, Default)]
struct Accumulator {
    /// Depth corrections must stay above this (nearest box behind)
    behind: Option<f32>,
    /// Depth corrections must stay below this (nearest box ahead)
    ahead: Option<f32>,
    /// Tightest snap to a front face (negative depth correction)
    forward: Option<f32>,
    /// Tightest snap to a back face
    backward: Option<f32>,
    ground: Option<GroundCandidate>,
    /// Some wall was reached by moving sideways
    wall_from_side: bool,
    /// Some wall was reached by moving vertically
    wall_from_above_or_below: bool,
}

fn tighten_min(slot: &mut Option<f32>, value: f32) {
    *slot = Some(slot.map_or(value, |v| v.min(value)));
}

fn tighten_max(slot: &mut Option<f32>, value: f32) {
    *slot = Some(slot.map_or(value, |v| v.max(value)));
}

impl Accumulator {
    fn classify(&mut self, index: usize, platform: &Platform, player: Vec3, mv: ProposedMove, basis: &CameraBasis) {
        let t = Thresholds::for_platform(platform, basis);
        let d = basis.project(player, platform.position);

        let overlap_x = d.x.abs() < t.x;
        let overlap_y = d.y.abs() < t.y;
        let overlap_z = d.depth.abs() < t.z;
        let after_x = (d.x - mv.horizontal).abs() <= t.x;
        let after_y = (d.y - mv.vertical).abs() <= t.y;

        if overlap_x && overlap_y && !overlap_z {
            if d.depth > 0.0 {
                tighten_min(&mut self.ahead, d.depth - t.z);
            } else {
                tighten_max(&mut self.behind, d.depth + t.z);
            }
        } else if !overlap_y && after_x && after_y && mv.vertical < 0.0 && !mv.drop_through {
            let nudge = if overlap_z {
                0.0
            } else {
                d.depth - d.depth.signum() * (t.z - 1.0).max(0.0)
            };
            let candidate = GroundCandidate {
                platform: index,
                nudge,
                top: platform.position.y + t.y,
            };
            if self.ground.map_or(true, |best| candidate.beats(&best)) {
                self.ground = Some(candidate);
            }
        } else if after_x && after_y && d.depth < t.z {
            // Any depth counts, except boxes whose front face is already behind
            // the player. Reaching this branch while overlapping X and Y means
            // the player is embedded in the box, which also snaps to a face
            tighten_min(&mut self.forward, d.depth - t.z);
            tighten_max(&mut self.backward, d.depth + t.z);
            self.wall_from_side |= !overlap_x;
            self.wall_from_above_or_below |= !overlap_y;
        }
    }

    /// Strictly inside the free-space window
    fn admits(&self, correction: f32) -> bool {
        self.behind.map_or(true, |b| correction > b) && self.ahead.map_or(true, |a| correction < a)
    }

    fn finish(self, mv: ProposedMove) -> Resolution {
        let mut resolution = Resolution {
            horizontal: mv.horizontal,
            vertical: mv.vertical,
            depth: 0.0,
            landing: None,
            blocked_horizontal: false,
            blocked_vertical: false,
        };

        // A zero nudge never moves the player through anything
        let ground = self.ground.filter(|g| g.nudge == 0.0 || self.admits(g.nudge));
        resolution.landing = ground.map(|g| Landing { platform: g.platform, y: g.top });

        if let Some(g) = ground.filter(|g| g.nudge != 0.0) {
            resolution.depth = g.nudge;
            return resolution;
        }

        let wall = self
            .forward
            .filter(|&c| self.admits(c))
            .or_else(|| self.backward.filter(|&c| self.admits(c)));

        match wall {
            Some(correction) => resolution.depth = correction,
            None if self.forward.is_some() => {
                // Every way out is behind another box: refuse the move instead
                if self.wall_from_side {
                    resolution.horizontal = 0.0;
                    resolution.blocked_horizontal = true;
                }
                if self.wall_from_above_or_below && mv.vertical > 0.0 {
                    resolution.vertical = 0.0;
                    resolution.blocked_vertical = true;
                }
            }
            None => {}
        }

        resolution
    }
}

/// Resolve one tick of movement for a player at `player` against `solids`.
/// Landing indices follow the iteration order of `solids`.
pub fn resolve<'a, I>(player: Vec3, mv: ProposedMove, basis: &CameraBasis, solids: I) -> Resolution
where
    I: IntoIterator<Item = &'a Platform>,
{
    let mut acc = Accumulator::default();
    for (index, platform) in solids.into_iter().enumerate() {
        acc.classify(index, platform, player, mv, basis);
    }
    acc.finish(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn falling(vertical: f32) -> ProposedMove {
        ProposedMove { horizontal: 0.0, vertical, drop_through: false }
    }

    fn block(x: f32, y: f32, z: f32, width: f32, height: f32, length: f32) -> Platform {
        Platform::new(Vec3::new(x, y, z), width, height, length, 2)
    }

    #[test]
    fn test_thresholds_follow_camera_angle() {
        let p = block(0.0, 0.0, 0.0, 4.0, 1.0, 2.0);
        let front = Thresholds::for_platform(&p, &CameraBasis::from_angle(0.0));
        assert_eq!(front, Thresholds { x: 2.5, y: 1.0, z: 1.5 });

        let side = Thresholds::for_platform(&p, &CameraBasis::from_angle(FRAC_PI_2));
        assert!((side.x - 1.5).abs() < 1e-5);
        assert!((side.z - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_empty_world_passes_move_through() {
        let mv = ProposedMove { horizontal: 0.3, vertical: -0.1, drop_through: false };
        let nothing: [Platform; 0] = [];
        let res = resolve(Vec3::ZERO, mv, &CameraBasis::default(), &nothing);
        assert_eq!(res.horizontal, 0.3);
        assert_eq!(res.vertical, -0.1);
        assert_eq!(res.depth, 0.0);
        assert_eq!(res.landing, None);
    }

    #[test]
    fn test_lands_when_move_crosses_top() {
        let platforms = [block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0)];
        let res = resolve(Vec3::new(0.0, 1.2, 0.0), falling(-0.3), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, Some(Landing { platform: 0, y: 1.0 }));
        assert_eq!(res.depth, 0.0);
    }

    #[test]
    fn test_no_landing_before_contact() {
        let platforms = [block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0)];
        let res = resolve(Vec3::new(0.0, 1.5, 0.0), falling(-0.3), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, None);
    }

    #[test]
    fn test_rising_never_lands() {
        let platforms = [block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0)];
        let res = resolve(Vec3::new(0.0, 1.0, 0.0), falling(0.2), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, None);
    }

    #[test]
    fn test_drop_through_skips_landing() {
        let platforms = [block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0)];
        let mv = ProposedMove { horizontal: 0.0, vertical: -0.3, drop_through: true };
        let res = resolve(Vec3::new(0.0, 1.2, 0.0), mv, &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, None);
        // Inside the depth slab: moved out through the front face instead
        assert!((res.depth - -2.0).abs() < 1e-6);
    }

    #[test]
    fn test_landing_far_away_in_depth_nudges_onto_footprint() {
        // Same screen position, 10 units deeper
        let platforms = [block(0.0, 0.0, 10.0, 3.0, 1.0, 3.0)];
        let res = resolve(Vec3::new(0.0, 1.2, 0.0), falling(-0.3), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, Some(Landing { platform: 0, y: 1.0 }));
        // Player ends 1 unit inside the far edge's threshold: depth 10 - 1
        assert!((res.depth - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_ground_wins() {
        let platforms = [
            block(0.0, 0.0, 10.0, 3.0, 1.0, 3.0),
            block(0.0, 0.0, -4.0, 3.0, 1.0, 3.0),
        ];
        let res = resolve(Vec3::new(0.0, 1.2, 0.0), falling(-0.3), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing.map(|l| l.platform), Some(1));
        assert!((res.depth - -3.0).abs() < 1e-6);
    }

    #[test]
    fn test_ground_tie_prefers_higher_top() {
        let platforms = [
            block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0),
            block(0.0, 0.3, 0.0, 3.0, 1.0, 3.0),
        ];
        let res = resolve(Vec3::new(0.0, 1.4, 0.0), falling(-0.5), &CameraBasis::default(), &platforms);
        let landing = res.landing.unwrap();
        assert_eq!(landing.platform, 1);
        assert!((landing.y - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_ground_nudge_blocked_by_box_in_between() {
        // Landing target is deep; a tall box sits between on screen
        let platforms = [
            block(0.0, 0.0, 10.0, 3.0, 1.0, 3.0),
            block(0.0, 1.0, 5.0, 3.0, 4.0, 1.0),
        ];
        let res = resolve(Vec3::new(0.0, 1.2, 0.0), falling(-0.3), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, None);
        assert_eq!(res.depth, 0.0);
    }

    #[test]
    fn test_walking_into_box_snaps_in_front() {
        // Box right of the player and overlapping its depth slab
        let platforms = [block(2.0, 0.0, 0.5, 2.0, 2.0, 2.0)];
        let mv = ProposedMove { horizontal: 0.2, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::new(0.4, 0.0, 0.0), mv, &CameraBasis::default(), &platforms);
        assert_eq!(res.horizontal, 0.2);
        assert!((res.depth - (0.5 - 1.5)).abs() < 1e-6);
        assert!(!res.blocked_horizontal);
    }

    #[test]
    fn test_box_nearer_the_camera_still_blocks() {
        // Lines up on screen but sits 10 units toward the viewer
        let platforms = [block(2.0, 0.0, -10.0, 2.0, 2.0, 2.0)];
        let mv = ProposedMove { horizontal: 0.2, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::new(0.4, 0.0, 0.0), mv, &CameraBasis::default(), &platforms);
        assert_eq!(res.horizontal, 0.2);
        assert!((res.depth - -11.5).abs() < 1e-5);
    }

    #[test]
    fn test_box_behind_the_player_is_walked_past() {
        let platforms = [block(2.0, 0.0, 10.0, 2.0, 2.0, 2.0)];
        let mv = ProposedMove { horizontal: 0.2, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::new(0.4, 0.0, 0.0), mv, &CameraBasis::default(), &platforms);
        assert_eq!(res.horizontal, 0.2);
        assert_eq!(res.depth, 0.0);
        assert!(!res.blocked_horizontal);
    }

    #[test]
    fn test_embedded_player_is_pushed_out_front() {
        let platforms = [block(0.0, 0.0, 0.5, 2.0, 2.0, 2.0)];
        let mv = ProposedMove { horizontal: 0.0, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::ZERO, mv, &CameraBasis::default(), &platforms);
        assert!((res.depth - -1.0).abs() < 1e-6);
        assert!(!res.blocked_horizontal);
    }

    #[test]
    fn test_front_blocked_uses_back_face() {
        let platforms = [
            block(2.0, 0.0, 0.5, 2.0, 2.0, 2.0),
            // Directly behind the player on screen, touching in depth
            block(0.0, 0.0, -1.5, 1.0, 2.0, 2.0),
        ];
        let mv = ProposedMove { horizontal: 0.2, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::new(0.4, 0.0, 0.0), mv, &CameraBasis::default(), &platforms);
        assert!((res.depth - (0.5 + 1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_boxed_in_blocks_horizontal_move() {
        let platforms = [
            block(2.0, 0.0, 0.5, 2.0, 2.0, 2.0),
            block(0.0, 0.0, -1.5, 1.0, 2.0, 2.0),
            block(0.0, 0.0, 1.5, 1.0, 2.0, 2.0),
        ];
        let mv = ProposedMove { horizontal: 0.2, vertical: 0.0, drop_through: false };
        let res = resolve(Vec3::new(0.4, 0.0, 0.0), mv, &CameraBasis::default(), &platforms);
        assert_eq!(res.depth, 0.0);
        assert_eq!(res.horizontal, 0.0);
        assert!(res.blocked_horizontal);
        assert!(!res.blocked_vertical);
    }

    #[test]
    fn test_resting_on_platform_is_stable() {
        let platforms = [block(0.0, 0.0, 0.0, 3.0, 1.0, 3.0)];
        let res = resolve(Vec3::new(0.0, 1.0, 0.0), falling(-0.015), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing, Some(Landing { platform: 0, y: 1.0 }));
        assert_eq!(res.depth, 0.0);
    }

    #[test]
    fn test_touching_box_ahead_does_not_reject_resting() {
        let platforms = [
            block(0.0, 0.0, 0.0, 3.0, 1.0, 1.0),
            // Tall box exactly touching the player's front in depth
            block(0.0, 1.5, 1.5, 3.0, 4.0, 2.0),
        ];
        let res = resolve(Vec3::new(0.0, 1.0, 0.0), falling(-0.015), &CameraBasis::default(), &platforms);
        assert_eq!(res.landing.map(|l| l.platform), Some(0));
    }

    #[test]
    fn test_overlap_depends_on_camera_angle() {
        // Offset along world X: below the player only when viewing down X
        let platforms = [block(6.0, 0.0, 0.0, 1.0, 1.0, 1.0)];
        let player = Vec3::new(0.0, 1.2, 0.0);

        let front = resolve(player, falling(-0.3), &CameraBasis::from_angle(0.0), &platforms);
        assert_eq!(front.landing, None);

        let side = resolve(player, falling(-0.3), &CameraBasis::from_angle(FRAC_PI_2), &platforms);
        assert!(side.landing.is_some());
    }
}
