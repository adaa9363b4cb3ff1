//! Reel stops and viewport geometry
//!
//! A stop is the landing position on a circular strip. The viewport shows
//! three rows around it: row offset 1 is one position above the stop, 2 the
//! stop itself, 3 one position below.

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, SpinError};
use crate::rng::StopSource;
use crate::symbols::{ReelSet, ReelStrip, Symbol};

/// Visible rows per reel
pub const VIEWPORT_ROWS: u8 = 3;

/// Row offset of the stop itself
pub const CENTER_ROW: u8 = 2;

/// One landing position per reel
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpinStops(pub Vec<usize>);

impl SpinStops {
    pub fn new(stops: Vec<usize>) -> Self {
        Self(stops)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 1-based positions for display
    pub fn display_positions(&self) -> Vec<usize> {
        self.0.iter().map(|s| s + 1).collect()
    }
}

impl From<Vec<usize>> for SpinStops {
    fn from(stops: Vec<usize>) -> Self {
        Self(stops)
    }
}

/// Map `offset` onto `[0, max_index]` circularly.
///
/// The strip has `max_index + 1` positions. A non-positive `max_index` is
/// returned unchanged: a single-symbol strip always shows position 0, and an
/// empty strip has no valid position.
pub fn wrap(max_index: i64, offset: i64) -> i64 {
    if max_index <= 0 {
        return max_index;
    }
    offset.rem_euclid(max_index + 1)
}

/// Symbol shown on `strip` at `row` (1..=3) when the reel lands on `stop`
pub fn visible_symbol(strip: &ReelStrip, stop: usize, row: u8) -> Option<Symbol> {
    let delta = i64::from(row) - i64::from(CENTER_ROW);
    let offset = i64::try_from(stop).ok()?.checked_add(delta)?;
    let position = usize::try_from(wrap(strip.max_index(), offset)).ok()?;
    strip.get(position)
}

/// One stop per reel, each inside its strip
pub fn check_stops(reels: &ReelSet, stops: &SpinStops) -> EngineResult<()> {
    if stops.len() != reels.columns() {
        return Err(SpinError::DimensionMismatch(format!(
            "{} stops for {} reels",
            stops.len(),
            reels.columns()
        )));
    }
    for (column, (strip, &stop)) in reels.iter().zip(stops.as_slice()).enumerate() {
        if stop >= strip.len() {
            return Err(SpinError::DimensionMismatch(format!(
                "stop {} on reel {} outside strip of {} symbols",
                stop,
                column + 1,
                strip.len()
            )));
        }
    }
    Ok(())
}

/// Draw one uniform stop per reel
pub fn spin_stops<R: StopSource + ?Sized>(reels: &ReelSet, rng: &mut R) -> EngineResult<SpinStops> {
    if reels.is_empty() {
        return Err(SpinError::EmptyConfiguration("reel set has no strips"));
    }
    if reels.first_empty_strip().is_some() {
        return Err(SpinError::EmptyConfiguration("reel strip has no symbols"));
    }

    let stops = reels.iter().map(|strip| rng.next_below(strip.len())).collect();
    Ok(SpinStops(stops))
}

/// The 3-row window for every reel, column-major
pub fn viewport(reels: &ReelSet, stops: &SpinStops) -> EngineResult<Vec<Vec<Symbol>>> {
    check_stops(reels, stops)?;

    reels
        .iter()
        .zip(stops.as_slice())
        .map(|(strip, &stop)| {
            (1..=VIEWPORT_ROWS)
                .map(|row| {
                    visible_symbol(strip, stop, row)
                        .ok_or(SpinError::EmptyConfiguration("reel strip has no symbols"))
                })
                .collect::<EngineResult<Vec<Symbol>>>()
        })
        .collect()
}
