#![allow(dead_code)]

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use space_shooter::entities::GameSession;
use space_shooter::phase;

pub const WIDTH: f32 = 600.0;
pub const HEIGHT: f32 = 800.0;

/// A session that has just been started: `Playing`, clock at 0, spawn
/// interval due at 4000 ms.  Player at (300, 700).
pub fn make_session() -> GameSession {
    let mut s = GameSession::new(WIDTH, HEIGHT);
    phase::start(&mut s);
    s
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// An RNG that yields a fixed script of uniform `f32` rolls, then a constant
/// fallback.  `rng.gen::<f32>()` returns each scripted value to within
/// 2⁻²⁴.
pub struct ScriptedRng {
    rolls: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    /// Scripted rolls followed by 0.99 forever: high enough that no enemy
    /// fires and no loot drops.
    pub fn new(rolls: &[f32]) -> Self {
        Self::with_fallback(rolls, 0.99)
    }

    pub fn with_fallback(rolls: &[f32], fallback: f32) -> Self {
        ScriptedRng {
            rolls: rolls.iter().copied().collect(),
            fallback,
        }
    }

    /// Rolls that were scripted but never consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }

    fn next_roll(&mut self) -> f32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        // rand samples f32 from the top 24 bits.
        let roll = self.next_roll().clamp(0.0, 1.0) as f64;
        let mantissa = ((roll * (1u64 << 24) as f64) as u64).min((1 << 24) - 1) as u32;
        mantissa << 8
    }

    fn next_u64(&mut self) -> u64 {
        let roll = self.next_roll().clamp(0.0, 1.0) as f64;
        let mantissa = ((roll * (1u64 << 53) as f64) as u64).min((1 << 53) - 1);
        mantissa << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
