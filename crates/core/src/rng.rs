//! RNG module - next-piece sources
//!
//! A [`PieceProvider`] yields catalog indices. The playfield asks for one index per
//! generated piece; results are reduced modulo the requested bound.
//!
//! Also provides a simple LCG for deterministic, seed-replayable games.

use crate::types::PieceKind;

/// Source of catalog indices for the next piece
pub trait PieceProvider {
    /// Pick an index in `[0, bound)`
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> PieceProvider for F {
    fn next_index(&mut self, bound: usize) -> usize {
        self(bound)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // LCG low bits have short periods; use the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current state (restarting from it replays the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceProvider for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}

/// Always yields the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPiece(pub PieceKind);

impl PieceProvider for FixedPiece {
    fn next_index(&mut self, _bound: usize) -> usize {
        self.0.index()
    }
}

/// Cycles through a fixed list of kinds (empty list behaves like `FixedPiece(T)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl PieceSequence {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            pos: 0,
        }
    }
}

impl PieceProvider for PieceSequence {
    fn next_index(&mut self, _bound: usize) -> usize {
        if self.kinds.is_empty() {
            return PieceKind::T.index();
        }
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_index(PieceKind::COUNT) < PieceKind::COUNT);
        }
    }

    #[test]
    fn test_rng_covers_every_kind() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; PieceKind::COUNT];
        for _ in 0..500 {
            seen[rng.next_index(PieceKind::COUNT)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_fixed_and_sequence() {
        let mut fixed = FixedPiece(PieceKind::O);
        assert_eq!(fixed.next_index(7), 3);

        let mut seq = PieceSequence::new([PieceKind::I, PieceKind::T]);
        assert_eq!(seq.next_index(7), 6);
        assert_eq!(seq.next_index(7), 0);
        assert_eq!(seq.next_index(7), 6);
    }

    #[test]
    fn test_closure_provider() {
        let mut provider = |_bound: usize| -> usize { 5 };
        assert_eq!(provider.next_index(7), 5);
    }
}
