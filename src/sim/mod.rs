//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied frame delta, fixed substep count
//! - Seeded RNG only
//! - Stable iteration order (store order; mutations deferred to scan edges)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod physics;
pub mod state;
pub mod step;

pub use catalog::{Color, SpriteHandle, TierDef, TierSprites, TIER_COUNT};
pub use collision::{bounce, circle_contact, separate, Contact};
pub use state::{Fruit, GameEvent, GamePhase, GameState, Particle};
pub use step::{step, RunOutcome, StepInput, StepReport};
