//! Data-driven game balance
//!
//! Physics and pacing values with defaults matching the shipped feel. A host
//! may override them from a JSON file; a missing or corrupt file falls back
//! to the defaults, never fails the game.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Balance values consumed by the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gravity (world units/s²)
    pub gravity: f32,
    /// Velocity retained per physics substep (applied per substep, not per
    /// second - the effective damping depends on the substep count, which is
    /// part of the shipped feel)
    pub damping: f32,
    /// Fraction of vertical speed kept (sign-flipped) on floor contact
    pub floor_restitution: f32,
    /// Horizontal speed multiplier on floor contact
    pub floor_friction: f32,
    /// Fraction of horizontal speed kept (sign-flipped) on side-wall contact
    pub wall_restitution: f32,
    /// Restitution for fruit-on-fruit bounces
    pub fruit_restitution: f32,
    /// Upward speed given to a freshly merged fruit so it visibly pops
    pub pop_speed: f32,
    /// Seconds the stack may rest above the overflow line before the run ends
    pub overflow_grace: f32,
    /// Below this speed a fruit counts as resting for the overflow check
    pub rest_speed: f32,
    /// Minimum seconds between accepted drops
    pub spawn_cooldown: f32,
    /// Particle life lost per second
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            damping: 0.995,
            floor_restitution: 0.2,
            floor_friction: 0.8,
            wall_restitution: 0.3,
            fruit_restitution: 0.2,
            pop_speed: 50.0,
            overflow_grace: 2.0,
            rest_speed: 100.0,
            spawn_cooldown: 0.5,
            particle_decay: 2.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults if the file is
    /// missing or unreadable. Unspecified fields take their default values.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Ignoring malformed tuning file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
