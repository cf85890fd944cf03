//! Simulation state and the fixed tick
//!
//! Per tick:
//! timers → shift trigger → camera basis + follow →
//! (shifting: shift update | kinematics → collision → respawn → puzzle)
//!
//! The draw queue is filled separately, once per rendered frame.

use crate::input::InputSnapshot;
use crate::math::Vec3;
use crate::world::{Level, Platform, PhysicsSettings, PLAYER_COLOR, HAT_COLOR};
use super::camera::{Camera, CameraBasis};
use super::collision;
use super::draw_queue::{CubeDraw, DrawQueue};
use super::event::{Events, RespawnEvent, SoundEvent};
use super::monolith::Puzzle;
use super::player::Player;
use super::respawn::Safety;
use super::shift::PerspectiveShift;

pub struct World {
    level: Level,
    pub player: Player,
    pub camera: Camera,
    pub shift: PerspectiveShift,
    safety: Safety,
    puzzle: Puzzle,
    pub events: Events,
    ticks: u64,
}

impl World {
    pub fn new(level: Level) -> Self {
        let spawn = level.spawn;
        let camera = Camera::new(spawn, level.physics.camera_size);
        let puzzle = Puzzle::new(level.goal, level.monolith);
        Self {
            player: Player::new(spawn),
            camera,
            shift: PerspectiveShift::new(),
            safety: Safety::new(spawn),
            puzzle,
            events: Events::new(),
            ticks: 0,
            level,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_grounded(&self) -> Vec3 {
        self.safety.last_grounded()
    }

    /// Back to the level's initial state. Pending events are dropped
    pub fn restart(&mut self) {
        log::info!("restarting level '{}'", self.level.name);
        let level = std::mem::take(&mut self.level);
        *self = World::new(level);
    }

    /// The monolith as a box, if the level has one
    fn monolith_platform(&self) -> Option<Platform> {
        self.puzzle
            .monolith()
            .map(|m| m.platform(self.level.physics.monolith_rise_ticks))
    }

    pub fn tick(&mut self, input: &InputSnapshot) {
        self.ticks += 1;
        let physics = self.level.physics;

        self.camera.advance_timers(&physics);

        if let Some(direction) = input.shift {
            if self.shift.trigger(direction, self.camera.angle, physics.shift_ticks) {
                log::debug!("perspective shift {} from {:.3} rad", direction.label(), self.camera.angle);
                self.events.sounds.send(SoundEvent::Shift { direction });
            }
        }

        self.camera.update_basis();
        self.camera.follow(self.player.position, &physics);

        if self.shift.is_shifting() {
            if let Some(angle) = self.shift.update() {
                self.camera.angle = angle;
            }
        } else {
            self.simulate(input, &physics);
        }
    }

    fn simulate(&mut self, input: &InputSnapshot, physics: &PhysicsSettings) {
        let basis = self.camera.basis();
        let player = &mut self.player;

        player.accelerate(input.movement, physics);
        if player.try_jump(input.jump, input.fast_fall, physics) {
            self.events.sounds.send(SoundEvent::Jump);
        }
        player.apply_gravity(input.jump, physics);

        let monolith = self.monolith_platform();
        let solids = self.level.platforms.iter().chain(monolith.as_ref());
        let resolution = collision::resolve(
            self.player.position,
            self.player.proposed_move(input.fast_fall),
            &basis,
            solids,
        );
        self.player.apply(&resolution, &basis);

        self.safety.record(&self.player);
        if let Some((from, to)) = self.safety.check(&mut self.player, physics) {
            self.camera.reset_teleport_timer();
            self.events.sounds.send(SoundEvent::Death);
            self.events.respawns.send(RespawnEvent { from, to });
        }

        if let Some(landing) = resolution.landing.filter(|_| self.player.grounded) {
            if self.puzzle.on_landing(landing.platform) {
                self.events.sounds.send(SoundEvent::PuzzleSolved);
                self.events.puzzle_solved.send(landing.platform);
            }
        }
        self.puzzle.update(physics.monolith_rise_ticks);
    }

    /// Queue every box for this frame: platforms, monolith and the player
    pub fn populate_draw_queue(&self, queue: &mut DrawQueue) {
        for platform in &self.level.platforms {
            queue.push(CubeDraw::from(platform));
        }
        if let Some(monolith) = self.monolith_platform() {
            queue.push(CubeDraw::from(&monolith));
        }

        let basis = CameraBasis::from_angle(self.camera.angle);
        let angle = self.camera.angle;
        let position = self.player.position;
        queue.push(CubeDraw::cube(position, 1.0, angle + self.shift.tilt(), PLAYER_COLOR));

        // Hat: toward the back of the head, lifted while falling
        let falling_offset = self.player.vertical_velocity.clamp(-0.25, 0.0);
        let hat = position + basis.right * -0.25 + Vec3::UP * (0.75 - falling_offset);
        queue.push(CubeDraw::cube(hat, 0.5, angle * 2.0, HAT_COLOR));

        queue.sort_back_to_front(&basis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::shift::ShiftDirection;
    use crate::world::{create_default_level, MonolithDef};
    use std::f32::consts::FRAC_PI_2;

    fn empty_level() -> Level {
        Level {
            platforms: Vec::new(),
            ..create_default_level()
        }
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn single_platform_level(platform: Platform, spawn: Vec3) -> Level {
        Level {
            spawn,
            platforms: vec![platform],
            ..create_default_level()
        }
    }

    fn sounds(world: &mut World) -> Vec<SoundEvent> {
        world.events.sounds.drain().collect()
    }

    #[test]
    fn test_no_platforms_velocity_decays_and_falls() {
        let mut world = World::new(empty_level());
        world.player.horizontal_velocity = 0.5;
        let mut last_vv = world.player.vertical_velocity;
        for _ in 0..30 {
            let before = world.player.horizontal_velocity;
            world.tick(&idle());
            assert!((world.player.horizontal_velocity - before * 0.7).abs() < 1e-7);
            assert!(world.player.vertical_velocity < last_vv);
            last_vv = world.player.vertical_velocity;
            assert!(!world.player.grounded);
        }
    }

    #[test]
    fn test_falling_onto_platform_lands_exactly_on_top() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 1.0, 3.0, 2);
        let mut world = World::new(single_platform_level(platform, Vec3::new(0.0, 10.0, 0.0)));
        world.player.vertical_velocity = -0.3;

        let mut landed = false;
        for _ in 0..100 {
            world.tick(&idle());
            if world.player.grounded {
                landed = true;
                break;
            }
            assert!(world.player.position.y > 1.0);
        }
        assert!(landed);
        assert_eq!(world.player.position.y, 1.0);
        assert_eq!(world.player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_resting_player_does_not_drift() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 1.0, 3.0, 2);
        let mut world = World::new(single_platform_level(platform, Vec3::new(0.3, 1.0, -0.4)));
        world.tick(&idle());
        let rest = world.player.position;
        for _ in 0..1000 {
            world.tick(&idle());
            assert!(world.player.grounded);
            assert_eq!(world.player.position, rest);
        }
        assert_eq!(rest, Vec3::new(0.3, 1.0, -0.4));
    }

    #[test]
    fn test_double_trigger_shifts_a_single_quarter_turn() {
        let mut world = World::new(create_default_level());
        let shift = InputSnapshot { shift: Some(ShiftDirection::Right), ..idle() };
        world.tick(&shift);
        world.tick(&shift);
        for _ in 0..200 {
            world.tick(&idle());
        }
        assert!(!world.shift.is_shifting());
        assert_eq!(world.camera.angle, FRAC_PI_2);
        let shift_sounds = sounds(&mut world)
            .into_iter()
            .filter(|s| matches!(s, SoundEvent::Shift { .. }))
            .count();
        assert_eq!(shift_sounds, 1);
    }

    #[test]
    fn test_shift_lasts_fifty_ticks_and_freezes_player() {
        let mut world = World::new(empty_level());
        world.player.vertical_velocity = -0.1;
        world.player.horizontal_velocity = 0.2;
        world.tick(&InputSnapshot { shift: Some(ShiftDirection::Left), ..idle() });
        let frozen = world.player.clone();
        for _ in 1..50 {
            assert!(world.shift.is_shifting());
            world.tick(&InputSnapshot { movement: 1.0, jump: true, ..idle() });
        }
        assert!(!world.shift.is_shifting());
        assert_eq!(world.player, frozen);
    }

    #[test]
    fn test_momentum_follows_new_camera_right_after_shift() {
        let mut world = World::new(empty_level());
        world.player.horizontal_velocity = 0.2;
        world.tick(&InputSnapshot { shift: Some(ShiftDirection::Right), ..idle() });
        while world.shift.is_shifting() {
            world.tick(&idle());
        }
        assert_eq!(world.player.horizontal_velocity, 0.2);

        let before = world.player.position;
        world.tick(&idle());
        let moved = world.player.position - before;
        assert!(moved.x.abs() < 1e-6);
        assert!((moved.z - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_fast_fall_respawns_at_last_grounded() {
        let mut world = World::new(empty_level());
        world.safety = Safety::new(Vec3::new(2.0, 0.0, 2.0));
        world.player.position = Vec3::new(0.0, -40.0, 0.0);
        world.player.vertical_velocity = -0.7;
        world.camera.since_teleport = 5.0;

        world.tick(&idle());
        assert_eq!(world.player.position, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(world.player.vertical_velocity, 0.0);
        assert_eq!(world.player.horizontal_velocity, 0.0);
        assert_eq!(world.camera.since_teleport, 0.0);
        assert_eq!(sounds(&mut world), vec![SoundEvent::Death]);
        assert_eq!(world.events.respawns.len(), 1);
    }

    #[test]
    fn test_jump_from_ground_fires_sound() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 1.0, 3.0, 2);
        let mut world = World::new(single_platform_level(platform, Vec3::new(0.0, 1.0, 0.0)));
        world.tick(&idle());
        assert!(world.player.grounded);

        world.tick(&InputSnapshot { jump: true, ..idle() });
        assert!(!world.player.grounded);
        assert!(world.player.position.y > 1.0);
        assert_eq!(sounds(&mut world), vec![SoundEvent::Jump]);
    }

    #[test]
    fn test_fast_fall_blocks_jump() {
        let platform = Platform::new(Vec3::ZERO, 3.0, 1.0, 3.0, 2);
        let mut world = World::new(single_platform_level(platform, Vec3::new(0.0, 1.0, 0.0)));
        world.tick(&idle());
        world.tick(&InputSnapshot { jump: true, fast_fall: true, ..idle() });
        assert!(sounds(&mut world).is_empty());
    }

    #[test]
    fn test_goal_landing_solves_and_raises_monolith() {
        let mut level = single_platform_level(
            Platform::new(Vec3::ZERO, 3.0, 1.0, 3.0, 2),
            Vec3::new(0.0, 3.0, 0.0),
        );
        level.goal = Some(0);
        level.monolith = Some(MonolithDef {
            position: Vec3::new(20.0, 2.0, 0.0),
            width: 2.0,
            height: 4.0,
            rise: 4.0,
            color: 3,
        });
        let mut world = World::new(level);
        for _ in 0..60 {
            world.tick(&idle());
        }
        assert!(world.puzzle().is_solved());
        let solved = sounds(&mut world)
            .into_iter()
            .filter(|s| *s == SoundEvent::PuzzleSolved)
            .count();
        assert_eq!(solved, 1);
        assert_eq!(world.events.puzzle_solved.len(), 1);

        for _ in 0..200 {
            world.tick(&idle());
        }
        let top = world.monolith_platform().map(|p| p.position.y);
        assert_eq!(top, Some(2.0));
    }

    #[test]
    fn test_restart_resets_state() {
        let mut world = World::new(create_default_level());
        world.player.position = Vec3::new(9.0, 9.0, 9.0);
        world.tick(&InputSnapshot { shift: Some(ShiftDirection::Right), ..idle() });
        world.restart();
        assert_eq!(world.player.position, Vec3::ZERO);
        assert!(!world.shift.is_shifting());
        assert_eq!(world.ticks(), 0);
        assert!(world.events.sounds.is_empty());
    }

    #[test]
    fn test_draw_queue_has_platforms_and_player() {
        let world = World::new(create_default_level());
        let mut queue = DrawQueue::new();
        world.populate_draw_queue(&mut queue);
        assert_eq!(queue.len(), 3 + 2);
        let colors: Vec<usize> = queue.drain().map(|c| c.color).collect();
        assert!(colors.contains(&PLAYER_COLOR));
        assert!(colors.contains(&HAT_COLOR));
        assert!(queue.is_empty());
    }
}
