//! Deterministic random number generation.
//!
//! RULE: No game may call any platform RNG.
//! All randomness flows through GameRng instances derived from the
//! engine's master seed, the game slot, and the mount counter:
//!   - Each mount of a game gets a fresh, reproducible stream.
//!   - Games never share a stream, so playing one never shifts another.

use crate::types::GameId;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG owned by one game session.
pub struct GameRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl GameRng {
    /// Create an RNG from a raw seed. Tests use this directly.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a percentage in [0.0, 100.0).
    pub fn next_percent(&mut self) -> f64 {
        self.next_f64() * 100.0
    }

    /// Pick an index in [0, n) uniformly.
    pub fn pick_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        (self.next_f64() * n as f64) as usize
    }
}

/// Hands out per-game RNG streams for one engine.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// RNG for the `mount`-th time `game` is mounted on the dashboard.
    pub fn for_game(&self, game: GameId, mount: u64) -> GameRng {
        let slot = game as u64;
        let derived = self.master_seed
            ^ slot.wrapping_mul(0x9e37_79b9_7f4a_7c15)
            ^ mount.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        GameRng::from_seed(derived).with_name(game.slug())
    }
}
