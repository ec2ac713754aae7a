//! Dice sources.
//!
//! Combat never touches a global generator: every roll goes through a
//! `Dice` value handed in by the caller. `RandomDice` wraps a seedable RNG;
//! `LoadedDice` replays a fixed sequence of faces, which makes any single
//! round reproducible by construction.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ResolverError;

/// Number of faces on a die.
pub const FACES: u8 = 6;

/// A source of six-sided die rolls.
pub trait Dice {
    /// Rolls one die, returning a face in `1..=6`.
    fn roll(&mut self) -> u8;

    /// Rolls `count` dice and sorts them highest first.
    fn roll_sorted(&mut self, count: u32) -> Vec<u8> {
        let mut faces: Vec<u8> = (0..count).map(|_| self.roll()).collect();
        faces.sort_unstable_by(|a, b| b.cmp(a));
        faces
    }
}

/// Uniform dice drawn from an RNG.
#[derive(Debug, Clone)]
pub struct RandomDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        RandomDice { rng }
    }
}

impl RandomDice<SmallRng> {
    /// Dice seeded from a `u64`.
    pub fn seeded(seed: u64) -> Self {
        RandomDice::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=FACES)
    }
}

/// Replays a fixed list of faces, cycling when exhausted.
///
/// Faces are consumed in roll order: for a combat round the attacker's dice
/// come first, then the defender's.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    faces: VecDeque<u8>,
}

impl LoadedDice {
    /// Fails on an empty list or a face outside `1..=6`.
    pub fn new(faces: &[u8]) -> Result<Self, ResolverError> {
        if faces.is_empty() {
            return Err(ResolverError::InvalidFace(0));
        }
        if let Some(&bad) = faces.iter().find(|&&f| f == 0 || f > FACES) {
            return Err(ResolverError::InvalidFace(bad));
        }
        Ok(LoadedDice {
            faces: faces.iter().copied().collect(),
        })
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        // Non-empty by construction.
        let face = self.faces.pop_front().unwrap_or(1);
        self.faces.push_back(face);
        face
    }
}
