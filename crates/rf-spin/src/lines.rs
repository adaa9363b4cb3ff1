//! Payline resolution and scatter counting

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, SpinError};
use crate::paytable::Payline;
use crate::reels::{SpinStops, VIEWPORT_ROWS, check_stops, visible_symbol};
use crate::symbols::{ReelSet, SpecialSymbols, Symbol};

/// Minimum run length that counts as a win
pub const MIN_RUN: usize = 2;

/// A winning run on one payline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    /// Payline index (1-based)
    pub line: usize,
    /// Paying symbol
    pub symbol: Symbol,
    /// Run length
    pub count: usize,
    /// Payout for this line
    pub payout: u64,
    /// Matched symbols, paying symbol first
    pub symbols: Vec<Symbol>,
}

impl WinLine {
    pub fn new(line: usize, symbol: Symbol, symbols: Vec<Symbol>) -> Self {
        Self {
            line,
            symbol,
            count: symbols.len(),
            payout: 0,
            symbols,
        }
    }
}

/// Resolve every payline against the landed stops.
///
/// The paying symbol is fixed before the scan: the column-0 symbol, or the
/// column-1 symbol when column 0 shows a wildcard. The run grows while a
/// column shows the wildcard or the paying symbol and ends for good at the
/// first column showing neither.
pub fn find_wins(
    stops: &SpinStops,
    reels: &ReelSet,
    paylines: &[Payline],
    special: &SpecialSymbols,
) -> EngineResult<Vec<WinLine>> {
    if reels.is_empty() {
        return Err(SpinError::EmptyConfiguration("reel set has no strips"));
    }
    if paylines.is_empty() {
        return Err(SpinError::EmptyConfiguration("no paylines"));
    }
    check_stops(reels, stops)?;

    let symbol_at = |column: usize, row: u8| -> EngineResult<Symbol> {
        let strip = &reels.strips[column];
        visible_symbol(strip, stops.0[column], row)
            .ok_or(SpinError::EmptyConfiguration("reel strip has no symbols"))
    };

    let mut wins = Vec::with_capacity(paylines.len());

    for (index, payline) in paylines.iter().enumerate() {
        if payline.columns() != reels.columns() {
            return Err(SpinError::DimensionMismatch(format!(
                "payline {} spans {} columns, reel set has {}",
                index + 1,
                payline.columns(),
                reels.columns()
            )));
        }
        if payline.columns() < MIN_RUN {
            return Err(SpinError::DimensionMismatch(format!(
                "payline {} spans {} column(s), at least {} needed",
                index + 1,
                payline.columns(),
                MIN_RUN
            )));
        }

        let rows = &payline.rows;
        let mut prime = symbol_at(0, rows[0])?;
        if special.is_wild(prime) {
            prime = symbol_at(1, rows[1])?;
        }

        let mut matched = Vec::with_capacity(rows.len());
        matched.push(prime);
        for (column, &row) in rows.iter().enumerate().skip(1) {
            let symbol = symbol_at(column, row)?;
            if special.is_wild(symbol) || symbol == prime {
                matched.push(symbol);
            } else {
                break;
            }
        }

        if matched.len() >= MIN_RUN {
            wins.push(WinLine::new(index + 1, prime, matched));
        }
    }

    Ok(wins)
}

/// Scatter occurrences across all viewport rows of every reel.
///
/// Independent of paylines. Zero for an empty reel set, and zero when the
/// stop count differs from the reel count.
pub fn count_scatter(stops: &SpinStops, reels: &ReelSet, scatter: Symbol) -> u32 {
    if stops.len() != reels.columns() {
        return 0;
    }
    let mut count = 0;
    for (strip, &stop) in reels.iter().zip(stops.as_slice()) {
        for row in 1..=VIEWPORT_ROWS {
            if visible_symbol(strip, stop, row) == Some(scatter) {
                count += 1;
            }
        }
    }
    count
}
