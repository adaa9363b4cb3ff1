//! Paylines, paytable and payout calculation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, SpinError};
use crate::lines::WinLine;
use crate::reels::VIEWPORT_ROWS;
use crate::symbols::Symbol;

/// A payline: one viewport row offset (1..=3) per reel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline {
    pub rows: Vec<u8>,
}

impl Payline {
    pub fn new(rows: Vec<u8>) -> Self {
        Self { rows }
    }

    /// Same row across every reel
    pub fn straight(row: u8, reel_count: usize) -> Self {
        Self::new(vec![row; reel_count])
    }

    /// Number of reels the line crosses
    pub fn columns(&self) -> usize {
        self.rows.len()
    }

    /// First offset outside the viewport, as (column, offset)
    pub fn invalid_offset(&self) -> Option<(usize, u8)> {
        self.rows
            .iter()
            .enumerate()
            .find(|&(_, &row)| row == 0 || row > VIEWPORT_ROWS)
            .map(|(column, &row)| (column, row))
    }
}

impl From<Vec<u8>> for Payline {
    fn from(rows: Vec<u8>) -> Self {
        Self::new(rows)
    }
}

/// Pay by run length for one symbol
pub type Pays = BTreeMap<u32, u64>;

/// Symbol → run length → payout, in per-line stake units.
///
/// Missing entries pay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    pub entries: BTreeMap<Symbol, Pays>,
}

impl PayTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style entry, replacing any earlier one
    pub fn with_pays(mut self, symbol: impl Into<Symbol>, pays: &[(u32, u64)]) -> Self {
        self.set_pays(symbol, pays);
        self
    }

    pub fn set_pays(&mut self, symbol: impl Into<Symbol>, pays: &[(u32, u64)]) {
        self.entries
            .insert(symbol.into(), pays.iter().copied().collect());
    }

    /// Pay for `count` of `symbol`, zero if the table has no entry
    pub fn pay(&self, symbol: Symbol, count: usize) -> u64 {
        let Ok(count) = u32::try_from(count) else {
            return 0;
        };
        self.entries
            .get(&symbol)
            .and_then(|pays| pays.get(&count))
            .copied()
            .unwrap_or(0)
    }

    /// Highest single-line pay in the table
    pub fn max_pay(&self) -> u64 {
        self.entries
            .values()
            .flat_map(|pays| pays.values().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Price every win line from the table and return the spin total.
///
/// Zero wins pay zero.
pub fn calculate_pay(wins: &mut [WinLine], paytable: &PayTable) -> EngineResult<u64> {
    let mut total: u64 = 0;
    for win in wins.iter_mut() {
        win.payout = paytable.pay(win.symbol, win.count);
        total = total
            .checked_add(win.payout)
            .ok_or(SpinError::PayoutOverflow)?;
    }
    Ok(total)
}

/// Scale priced win lines by the per-line stake; returns the scaled total
pub fn apply_stake(wins: &mut [WinLine], stake: u64) -> EngineResult<u64> {
    let mut total: u64 = 0;
    for win in wins.iter_mut() {
        win.payout = win
            .payout
            .checked_mul(stake)
            .ok_or(SpinError::PayoutOverflow)?;
        total = total
            .checked_add(win.payout)
            .ok_or(SpinError::PayoutOverflow)?;
    }
    Ok(total)
}
