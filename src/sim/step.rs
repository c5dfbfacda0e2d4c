//! Per-frame simulation step
//!
//! The host calls [`step`] once per rendered frame with the frame delta and
//! any input. Physics runs in a fixed number of substeps; fruits created or
//! destroyed by merges are applied only between substeps, never mid-scan, so
//! the pairwise pass always iterates a stable store.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog;
use super::collision;
use super::physics;
use super::state::{Fruit, GameEvent, GamePhase, GameState, Particle, MAX_PARTICLES};
use crate::consts::*;
use crate::tuning::Tuning;

/// Host commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInput {
    /// Drop the current fruit at this x position. Honored only while playing
    /// and once the drop cooldown has elapsed; the x is clamped to keep the
    /// fruit inside the walls.
    pub drop_x: Option<f32>,
    /// Pause toggle
    pub pause: bool,
}

/// Terminal transition produced by a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The stack rested above the overflow line too long
    GameOver,
    /// Two top-tier fruits merged
    Victory,
}

/// Frame output for the host's HUD and audio
#[derive(Debug, Clone)]
pub struct StepReport {
    pub score: u64,
    /// Tier the next drop will spawn
    pub current_tier: usize,
    /// Preview of the drop after that
    pub next_tier: usize,
    /// Set on the frame the run ends
    pub outcome: Option<RunOutcome>,
    pub events: Vec<GameEvent>,
}

impl StepReport {
    fn snapshot(state: &GameState) -> Self {
        Self {
            score: state.score,
            current_tier: state.current_tier,
            next_tier: state.next_tier,
            outcome: None,
            events: Vec::new(),
        }
    }
}

/// Advance the simulation by one frame of `dt` seconds
pub fn step(state: &mut GameState, input: &StepInput, dt: f32) -> StepReport {
    let mut report = StepReport::snapshot(state);

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return report;
            }
            GamePhase::Paused => {
                // Resume and run this frame normally
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return report;
    }

    let tuning = state.tuning.clone();

    state.spawn_timer += dt;
    if let Some(x) = input.drop_x {
        handle_drop(state, &tuning, x, &mut report);
    }

    let sub_dt = dt / PHYSICS_SUBSTEPS as f32;
    for _ in 0..PHYSICS_SUBSTEPS {
        substep(state, &tuning, sub_dt, &mut report);
    }

    update_particles(state, &tuning, dt);

    // A victory this frame finishes its physics, but the run is decided:
    // the loss condition no longer applies.
    if state.phase == GamePhase::Playing {
        detect_overflow(state, &tuning, dt, &mut report);
    }

    report.score = state.score;
    report.current_tier = state.current_tier;
    report.next_tier = state.next_tier;
    report
}

/// Spawn the current fruit at the requested x if the cooldown allows it
fn handle_drop(state: &mut GameState, tuning: &Tuning, x: f32, report: &mut StepReport) {
    if state.spawn_timer < tuning.spawn_cooldown {
        return;
    }
    let r = catalog::radius(state.current_tier);
    let x = x.clamp(WALL_THICKNESS + r, ARENA_WIDTH - WALL_THICKNESS - r);
    state.fruits.push(Fruit::new(x, SPAWN_Y, state.current_tier));
    report.events.push(GameEvent::Dropped {
        tier: state.current_tier,
    });
    state.advance_dropper();
    state.spawn_timer = 0.0;
}

/// One physics substep: integrate, scan all pairs, then apply deferred
/// merge results.
///
/// Merging tombstones both participants immediately (they pair with nothing
/// else this scan) but the replacement fruit and the purge wait until the
/// scan is over, so indices stay valid and a fruit born mid-substep is first
/// seen by the next substep.
fn substep(state: &mut GameState, tuning: &Tuning, dt: f32, report: &mut StepReport) {
    for fruit in state.fruits.iter_mut().filter(|f| f.active) {
        physics::integrate(fruit, tuning, dt);
        physics::resolve_walls(fruit, tuning);
    }

    // (midpoint, merged tier) per merge this scan
    let mut merges: Vec<(Vec2, usize)> = Vec::new();

    let n = state.fruits.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if !state.fruits[i].active {
                break;
            }
            if !state.fruits[j].active {
                continue;
            }
            let (head, tail) = state.fruits.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let Some(contact) = collision::circle_contact(a.pos, a.radius(), b.pos, b.radius())
            else {
                continue;
            };

            if a.tier == b.tier {
                a.active = false;
                b.active = false;
                merges.push(((a.pos + b.pos) * 0.5, a.tier));
            } else {
                collision::separate(&mut a.pos, &mut b.pos, &contact);
                collision::bounce(
                    &mut a.vel,
                    &mut b.vel,
                    catalog::mass(a.tier),
                    catalog::mass(b.tier),
                    tuning.fruit_restitution,
                    contact.normal,
                );
            }
        }
    }

    let mut spawned: Vec<Fruit> = Vec::new();
    for (mid, tier) in merges {
        emit_merge_burst(&mut state.particles, &mut state.rng, mid, tier);

        if tier == catalog::TIER_COUNT - 1 {
            state.phase = GamePhase::Victory;
            report.outcome = Some(RunOutcome::Victory);
            if state.score > state.high_score {
                state.high_score = state.score;
                report.events.push(GameEvent::HighScore { score: state.score });
            }
        } else {
            let new_tier = tier + 1;
            let mut fruit = Fruit::new(mid.x, mid.y, new_tier);
            fruit.vel.y = -tuning.pop_speed;
            spawned.push(fruit);

            state.score += catalog::score_value(tier) * 2;
            report.events.push(GameEvent::Merged {
                pos: mid,
                tier: new_tier,
                pitch: 0.8 + new_tier as f32 * 0.1,
            });
        }
    }

    state.fruits.extend(spawned);
    state.fruits.retain(|f| f.active);
}

/// Burst of particles at a merge point, colored like the merged tier
fn emit_merge_burst(particles: &mut Vec<Particle>, rng: &mut Pcg32, pos: Vec2, tier: usize) {
    let color = catalog::color(tier);
    for _ in 0..MERGE_PARTICLES {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        particles.push(Particle {
            pos,
            vel: Vec2::new(
                rng.random_range(-150.0..=150.0),
                rng.random_range(-150.0..=150.0),
            ),
            life: 1.0,
            color,
            size: rng.random_range(4.0..=9.0),
        });
    }
}

/// Advance particles once per frame (not substepped) and purge the dead
fn update_particles(state: &mut GameState, tuning: &Tuning, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= tuning.particle_decay * dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Evaluate the loss condition: any fruit resting with its top edge above the
/// overflow line accumulates the timer; otherwise the timer decays toward
/// zero. Crossing the grace period ends the run.
fn detect_overflow(state: &mut GameState, tuning: &Tuning, dt: f32, report: &mut StepReport) {
    let overflowing = state.fruits.iter().any(|f| {
        f.pos.y - f.radius() < OVERFLOW_Y && f.vel.length() < tuning.rest_speed
    });

    if overflowing {
        state.overflow_timer += dt;
        if state.overflow_timer > tuning.overflow_grace {
            state.phase = GamePhase::GameOver;
            report.outcome = Some(RunOutcome::GameOver);
            if state.score > state.high_score {
                state.high_score = state.score;
                report.events.push(GameEvent::HighScore { score: state.score });
            }
        }
    } else {
        state.overflow_timer = (state.overflow_timer - dt).max(0.0);
    }
}
