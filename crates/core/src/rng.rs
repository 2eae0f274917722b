//! RNG module - symbol generation for refills and new boards
//!
//! Symbols are drawn independently and uniformly from the alphabet. The
//! engine only talks to the [`SymbolSource`] trait so tests and replays can
//! inject a deterministic sequence.
//!
//! Also provides a simple LCG for deterministic, seedable play.

use crate::types::Symbol;

/// Supplier of fresh symbols.
pub trait SymbolSource {
    /// Draw one symbol from an alphabet of `symbol_count` symbols.
    fn next_symbol(&mut self, symbol_count: u8) -> Symbol;

    /// Draw an index in `[0, max)`.
    fn next_index(&mut self, max: usize) -> usize;

    /// Restart the stream from `seed`.
    fn reseed(&mut self, seed: u32);

    /// Current stream position; `reseed(state())` resumes the same stream.
    fn state(&self) -> u32;
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
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SymbolSource for SimpleRng {
    fn next_symbol(&mut self, symbol_count: u8) -> Symbol {
        Symbol::new(self.next_range(symbol_count.max(1) as u32) as u8)
    }

    fn next_index(&mut self, max: usize) -> usize {
        self.next_range(max as u32) as usize
    }

    fn reseed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    fn state(&self) -> u32 {
        self.state
    }
}

/// Replays a fixed list of symbols, cycling when exhausted.
///
/// Index draws walk the same cursor (`symbol.index() % max`), so a scripted
/// source fully determines a session.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    symbols: Vec<Symbol>,
    cursor: usize,
}

impl SequenceSource {
    /// # Panics
    ///
    /// Panics if `symbols` is empty.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        assert!(!symbols.is_empty(), "sequence source needs at least one symbol");
        Self { symbols, cursor: 0 }
    }

    /// Build from a label string, e.g. `"ABCD"`.
    pub fn from_labels(labels: &str) -> Self {
        Self::new(labels.chars().filter_map(Symbol::from_label).collect())
    }

    fn advance(&mut self) -> Symbol {
        let symbol = self.symbols[self.cursor % self.symbols.len()];
        self.cursor += 1;
        symbol
    }

    /// Symbols consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl SymbolSource for SequenceSource {
    fn next_symbol(&mut self, _symbol_count: u8) -> Symbol {
        self.advance()
    }

    fn next_index(&mut self, max: usize) -> usize {
        let symbol = self.advance();
        symbol.index() as usize % max.max(1)
    }

    fn reseed(&mut self, _seed: u32) {
        self.cursor = 0;
    }

    fn state(&self) -> u32 {
        self.cursor as u32
    }
}
