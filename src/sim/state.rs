//! Game state and core simulation types
//!
//! The entity store (fruits, particles) and the run state (score, tier
//! preview, timers, phase). Mutated only by [`step`](super::step::step) and
//! the explicit run-control methods; hosts read it as a snapshot between
//! steps.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{self, Color};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen; no simulation runs
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Run lost to overflow (terminal)
    GameOver,
    /// Two top-tier fruits merged (terminal)
    Victory,
}

impl GamePhase {
    /// Terminal phases absorb: no further simulation or transitions except reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// A falling fruit
#[derive(Debug, Clone, Copy)]
pub struct Fruit {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Catalog index, 0..TIER_COUNT
    pub tier: usize,
    /// Cleared when the fruit merges; tombstones are purged at substep end
    /// and must not pair again within the same scan
    pub active: bool,
}

impl Fruit {
    pub fn new(x: f32, y: f32, tier: usize) -> Self {
        debug_assert!(tier < catalog::TIER_COUNT);
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            tier,
            active: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        catalog::radius(self.tier)
    }
}

/// A cosmetic particle from a merge burst. No collision, no gameplay effect.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, decays to 0
    pub life: f32,
    pub color: Color,
    pub size: f32,
}

/// Maximum live particles; the oldest are evicted first
pub const MAX_PARTICLES: usize = 256;

/// Events produced by a step, for the host to present (sound, flashes, ...)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A drop request was accepted
    Dropped { tier: usize },
    /// Two fruits merged into `tier`; `pitch` is a playback-rate hint
    Merged { pos: Vec2, tier: usize, pitch: f32 },
    /// Score passed the stored best; the host should write it through
    HighScore { score: u64 },
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed (tier preview and particle ranges draw from it)
    pub seed: u64,
    pub phase: GamePhase,
    pub fruits: Vec<Fruit>,
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Best score at startup; updated in place when surpassed at run end
    pub high_score: u64,
    /// Tier of the next drop
    pub current_tier: usize,
    /// Preview of the drop after that
    pub next_tier: usize,
    /// Seconds since the last accepted drop
    pub spawn_timer: f32,
    /// Seconds the stack has been resting above the overflow line
    pub overflow_timer: f32,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a state sitting at the menu with the given seed
    pub fn new(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_tier = rng.random_range(0..=MAX_DROP_TIER);
        Self {
            seed,
            phase: GamePhase::Menu,
            fruits: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score,
            current_tier: 0,
            next_tier,
            spawn_timer: 0.0,
            overflow_timer: 0.0,
            tuning,
            rng,
        }
    }

    /// Begin a fresh run. Valid from the menu or a terminal screen.
    pub fn start_run(&mut self) {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Victory => {
                self.reset();
                self.phase = GamePhase::Playing;
            }
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    /// Return to the menu from a terminal screen
    pub fn to_menu(&mut self) {
        if self.phase.is_terminal() {
            self.reset();
        }
    }

    /// Empty the store and zero the run state; rerolls the tier preview
    pub fn reset(&mut self) {
        self.fruits.clear();
        self.particles.clear();
        self.score = 0;
        self.current_tier = 0;
        self.next_tier = self.rng.random_range(0..=MAX_DROP_TIER);
        self.spawn_timer = 0.0;
        self.overflow_timer = 0.0;
        self.phase = GamePhase::Menu;
    }

    /// Advance the dropper queue: current takes the preview, preview rerolls
    pub(crate) fn advance_dropper(&mut self) {
        self.current_tier = self.next_tier;
        self.next_tier = self.rng.random_range(0..=MAX_DROP_TIER);
    }

    /// Count of fruits still participating in the simulation
    pub fn active_fruits(&self) -> usize {
        self.fruits.iter().filter(|f| f.active).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_menu() {
        let state = GameState::new(7, 0, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.fruits.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.next_tier <= MAX_DROP_TIER);
    }

    #[test]
    fn test_start_run_only_from_menu_or_terminal() {
        let mut state = GameState::new(7, 0, Tuning::default());
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);

        // Already playing: start_run is a no-op, state is preserved
        state.score = 123;
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 123);

        state.phase = GamePhase::GameOver;
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::new(7, 500, Tuning::default());
        state.start_run();
        state.fruits.push(Fruit::new(100.0, 100.0, 2));
        state.score = 999;
        state.overflow_timer = 1.5;

        state.reset();
        assert!(state.fruits.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.overflow_timer, 0.0);
        // The stored best survives a reset
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_same_seed_same_preview_sequence() {
        let mut a = GameState::new(99, 0, Tuning::default());
        let mut b = GameState::new(99, 0, Tuning::default());
        for _ in 0..20 {
            a.advance_dropper();
            b.advance_dropper();
            assert_eq!(a.current_tier, b.current_tier);
            assert_eq!(a.next_tier, b.next_tier);
        }
    }
}
