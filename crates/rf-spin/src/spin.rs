//! Spin results and cascade outcomes

use serde::{Deserialize, Serialize};

use crate::lines::WinLine;
use crate::reels::SpinStops;

/// Spin kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinKind {
    /// The paid spin that opens every resolution
    Base,
    /// Free spin granted by scatters
    Bonus,
}

impl SpinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Bonus => "bonus",
        }
    }
}

impl std::fmt::Display for SpinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One resolved spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Spin kind
    pub kind: SpinKind,
    /// Landing positions, 0-based
    pub stops: SpinStops,
    /// Per-line stake the spin was paid at
    pub stake: u64,
    /// Total pay (already scaled by the stake)
    pub pay: u64,
    /// Winning lines
    pub win_lines: Vec<WinLine>,
    /// Scatters in the viewport
    pub scatter_count: u32,
    /// Bonus spins this spin grants
    pub free_spins: u32,
}

impl SpinResult {
    pub fn is_win(&self) -> bool {
        self.pay > 0
    }

    pub fn triggers_bonus(&self) -> bool {
        self.free_spins > 0
    }
}

/// A base spin plus every bonus spin it chained into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Amount staked for the base spin (bet × paylines)
    pub wager: u64,
    /// Grand total across all spins
    pub total_payout: u64,
    /// Base spin first, then bonus spins in resolution order
    pub spins: Vec<SpinResult>,
}

impl CascadeOutcome {
    pub(crate) fn new(wager: u64) -> Self {
        Self {
            wager,
            total_payout: 0,
            spins: Vec::new(),
        }
    }

    /// The base spin, if one was resolved
    pub fn base(&self) -> Option<&SpinResult> {
        self.spins.first().filter(|s| s.kind == SpinKind::Base)
    }

    /// Bonus spins in resolution order
    pub fn bonus_spins(&self) -> impl Iterator<Item = &SpinResult> {
        self.spins.iter().filter(|s| s.kind == SpinKind::Bonus)
    }

    pub fn bonus_count(&self) -> usize {
        self.bonus_spins().count()
    }

    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    /// Payout relative to the wager
    pub fn win_ratio(&self) -> f64 {
        if self.wager > 0 {
            self.total_payout as f64 / self.wager as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(kind: SpinKind, pay: u64) -> SpinResult {
        SpinResult {
            kind,
            stops: SpinStops::new(vec![0, 0]),
            stake: 1,
            pay,
            win_lines: Vec::new(),
            scatter_count: 0,
            free_spins: 0,
        }
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = CascadeOutcome {
            wager: 20,
            total_payout: 50,
            spins: vec![
                result(SpinKind::Base, 10),
                result(SpinKind::Bonus, 0),
                result(SpinKind::Bonus, 40),
            ],
        };
        assert_eq!(outcome.base().map(|b| b.pay), Some(10));
        assert_eq!(outcome.bonus_count(), 2);
        assert!(outcome.is_win());
        assert_eq!(outcome.win_ratio(), 2.5);
    }

    #[test]
    fn test_empty_outcome() {
        let outcome = CascadeOutcome::default();
        assert!(outcome.base().is_none());
        assert_eq!(outcome.win_ratio(), 0.0);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SpinKind::Bonus).unwrap(), "\"bonus\"");
    }
}
