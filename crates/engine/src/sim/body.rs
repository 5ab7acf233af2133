use crate::content::MoveTuning;

use super::collision::{body_bounds, resolve_tile_collisions};
use super::math::{Recti, Vec2};
use super::tiles::TileGrid;

/// Movement input for one tick, sampled by the owning actor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// Horizontal control in [-1, 1].
    pub horizontal: f32,
    /// Whether the jump control is held this tick.
    pub jump_held: bool,
}

/// Position, velocity and ground/jump state for one actor.
///
/// Mutated exclusively by its own `integrate` call, once per tick. The
/// bounding rectangle is derived per query from the rounded position plus the
/// collider rect of the current animation frame list; it is never cached.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    is_on_ground: bool,
    jump_time: f32,
    was_jump_held: bool,
    previous_bottom: f32,
}

impl PhysicsBody {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            is_on_ground: false,
            jump_time: 0.0,
            was_jump_held: false,
            previous_bottom: 0.0,
        }
    }

    pub fn is_on_ground(&self) -> bool {
        self.is_on_ground
    }

    pub fn jump_time(&self) -> f32 {
        self.jump_time
    }

    pub fn bounds(&self, collider: Recti) -> Recti {
        body_bounds(self.position, collider)
    }

    /// Advances the body by one fixed step and separates it from the grid.
    ///
    /// The comparison at the end is against the start-of-tick position: a
    /// collision that cancels the tick's net movement zeroes the velocity on
    /// that axis, and so does a sub-pixel step that rounds away.
    pub fn integrate(
        &mut self,
        dt: f32,
        intent: MoveIntent,
        collider: Recti,
        tuning: &MoveTuning,
        tiles: &TileGrid,
    ) {
        let start_position = self.position;

        self.velocity.x += intent.horizontal * tuning.move_acceleration * dt;
        self.velocity.y = (self.velocity.y + tuning.gravity_acceleration * dt)
            .clamp(-tuning.max_fall_speed, tuning.max_fall_speed);

        self.velocity.y = self.apply_jump_curve(self.velocity.y, intent.jump_held, dt, tuning);

        let drag = if self.is_on_ground {
            tuning.ground_drag_factor
        } else {
            tuning.air_drag_factor
        };
        self.velocity.x *= drag;
        self.velocity.x = self
            .velocity
            .x
            .clamp(-tuning.max_move_speed, tuning.max_move_speed);

        self.position.x = (self.position.x + self.velocity.x * dt).round();
        self.position.y = (self.position.y + self.velocity.y * dt).round();

        self.is_on_ground = resolve_tile_collisions(
            &mut self.position,
            collider,
            &mut self.previous_bottom,
            self.velocity.x,
            tiles,
        );

        if self.position.x == start_position.x {
            self.velocity.x = 0.0;
        }
        if self.position.y == start_position.y {
            self.velocity.y = 0.0;
            self.jump_time = 0.0;
        }
    }

    /// Jump sub-state machine. During the ascent the vertical velocity is
    /// fully overridden by a power curve so releasing jump early shortens the
    /// arc; past `max_jump_time_seconds` (the apex) gravity takes over.
    fn apply_jump_curve(
        &mut self,
        velocity_y: f32,
        jump_held: bool,
        dt: f32,
        tuning: &MoveTuning,
    ) -> f32 {
        let mut velocity_y = velocity_y;
        if jump_held {
            // Begin a jump only from the ground on a fresh press; continue
            // one already in progress.
            if (!self.was_jump_held && self.is_on_ground) || self.jump_time > 0.0 {
                self.jump_time += dt;
            }

            if 0.0 < self.jump_time && self.jump_time <= tuning.max_jump_time_seconds {
                velocity_y = tuning.jump_launch_velocity
                    * (1.0
                        - (self.jump_time / tuning.max_jump_time_seconds)
                            .powf(tuning.jump_control_power));
            } else {
                self.jump_time = 0.0;
            }
        } else {
            self.jump_time = 0.0;
        }
        self.was_jump_held = jump_held;

        velocity_y
    }
}
