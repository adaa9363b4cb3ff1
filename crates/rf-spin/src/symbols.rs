//! Symbol definitions and reel strips

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reel face, identified by an opaque integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub u32);

impl Symbol {
    /// Raw symbol code
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl From<u32> for Symbol {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symbols with a role beyond paying on a line.
///
/// Pointing either role at a symbol that never lands on a reel switches the
/// feature off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialSymbols {
    /// Substitutes for any paying symbol within a run
    pub wildcard: Symbol,
    /// Counted across the whole viewport; triggers bonus spins
    pub scatter: Symbol,
}

impl SpecialSymbols {
    pub fn new(wildcard: impl Into<Symbol>, scatter: impl Into<Symbol>) -> Self {
        Self {
            wildcard: wildcard.into(),
            scatter: scatter.into(),
        }
    }

    pub fn is_wild(&self, symbol: Symbol) -> bool {
        symbol == self.wildcard
    }

    pub fn is_scatter(&self, symbol: Symbol) -> bool {
        symbol == self.scatter
    }
}

/// A circular reel strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelStrip {
    /// Symbols in strip order
    pub symbols: Vec<Symbol>,
}

impl ReelStrip {
    /// Create a new reel strip
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Build a strip from raw symbol codes
    pub fn from_codes(codes: &[u32]) -> Self {
        Self::new(codes.iter().copied().map(Symbol).collect())
    }

    /// Symbol at a position already reduced onto the strip
    pub fn get(&self, position: usize) -> Option<Symbol> {
        self.symbols.get(position).copied()
    }

    /// Highest valid position, or -1 for an empty strip
    pub fn max_index(&self) -> i64 {
        self.symbols.len() as i64 - 1
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Does the symbol appear anywhere on the strip?
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// One strip per visible column. Strips may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReelSet {
    pub strips: Vec<ReelStrip>,
}

impl ReelSet {
    pub fn new(strips: Vec<ReelStrip>) -> Self {
        Self { strips }
    }

    /// Build a reel set from raw symbol codes, one slice per column
    pub fn from_codes(columns: &[&[u32]]) -> Self {
        Self::new(columns.iter().map(|c| ReelStrip::from_codes(c)).collect())
    }

    /// Number of visible columns
    pub fn columns(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReelStrip> {
        self.strips.iter()
    }

    pub fn get(&self, column: usize) -> Option<&ReelStrip> {
        self.strips.get(column)
    }

    /// Index of the first empty strip, if any
    pub fn first_empty_strip(&self) -> Option<usize> {
        self.strips.iter().position(ReelStrip::is_empty)
    }

    /// Does the symbol land anywhere on any strip?
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.strips.iter().any(|s| s.contains(symbol))
    }
}
