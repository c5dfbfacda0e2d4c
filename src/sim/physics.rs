//! Per-substep integration and wall contacts
//!
//! Semi-implicit Euler: velocity is updated (gravity, damping) before the
//! position integrates it. Damping multiplies per substep; see
//! [`Tuning::damping`](crate::tuning::Tuning).

use crate::consts::*;
use crate::tuning::Tuning;

use super::state::Fruit;

/// Advance one fruit by one substep of duration `dt`
pub fn integrate(fruit: &mut Fruit, tuning: &Tuning, dt: f32) {
    fruit.vel.y += tuning.gravity * dt;
    fruit.vel *= tuning.damping;
    fruit.pos += fruit.vel * dt;
}

/// Clamp a fruit back inside the arena, applying restitution and friction.
///
/// The floor damps both axes (fruits settle); the side walls only flip the
/// horizontal component.
pub fn resolve_walls(fruit: &mut Fruit, tuning: &Tuning) {
    let r = fruit.radius();

    // Floor
    if fruit.pos.y > ARENA_HEIGHT - r {
        fruit.pos.y = ARENA_HEIGHT - r;
        fruit.vel.y *= -tuning.floor_restitution;
        fruit.vel.x *= tuning.floor_friction;
    }
    // Left wall
    if fruit.pos.x < WALL_THICKNESS + r {
        fruit.pos.x = WALL_THICKNESS + r;
        fruit.vel.x *= -tuning.wall_restitution;
    }
    // Right wall
    if fruit.pos.x > ARENA_WIDTH - WALL_THICKNESS - r {
        fruit.pos.x = ARENA_WIDTH - WALL_THICKNESS - r;
        fruit.vel.x *= -tuning.wall_restitution;
    }
}
