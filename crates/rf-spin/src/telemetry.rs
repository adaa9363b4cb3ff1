//! Diagnostics sinks
//!
//! The engine reports progress through an injected [`SpinTelemetry`]; it
//! never logs or counts on its own.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::SpinError;
use crate::spin::{CascadeOutcome, SpinResult};

/// Receives engine events. Every hook defaults to a no-op.
pub trait SpinTelemetry: Send + Sync {
    /// A base or bonus spin was resolved
    fn on_spin(&self, _result: &SpinResult) {}

    /// A spin granted `awarded` bonus spins; `queued` is the new counter
    fn on_bonus_awarded(&self, _awarded: u32, _queued: u32) {}

    /// A resolution finished without error
    fn on_cascade_complete(&self, _outcome: &CascadeOutcome) {}

    /// A resolution aborted
    fn on_error(&self, _error: &SpinError) {}
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl SpinTelemetry for NullTelemetry {}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl SpinTelemetry for LogTelemetry {
    fn on_spin(&self, result: &SpinResult) {
        log::debug!(
            "[Spin] {} stops={:?} pay={} lines={} scatters={}",
            result.kind,
            result.stops.as_slice(),
            result.pay,
            result.win_lines.len(),
            result.scatter_count
        );
    }

    fn on_bonus_awarded(&self, awarded: u32, queued: u32) {
        log::info!("[Bonus] +{} free spins ({} queued)", awarded, queued);
    }

    fn on_cascade_complete(&self, outcome: &CascadeOutcome) {
        log::info!(
            "[Cascade] wager={} paid={} spins={} bonus={}",
            outcome.wager,
            outcome.total_payout,
            outcome.spins.len(),
            outcome.bonus_count()
        );
    }

    fn on_error(&self, error: &SpinError) {
        log::warn!("[Cascade] aborted: {}", error);
    }
}

/// Session statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Completed resolutions
    pub cascades: u64,
    /// Resolved spins, base and bonus
    pub spins: u64,
    pub bonus_spins: u64,
    /// Resolutions that paid anything
    pub winning_cascades: u64,
    /// Resolutions whose base spin triggered bonus spins
    pub bonus_triggers: u64,
    pub total_wagered: u64,
    pub total_paid: u64,
    /// Most spins in one resolution
    pub longest_cascade: usize,
    pub largest_payout: u64,
    pub errors: u64,
}

impl SessionSnapshot {
    /// Calculate RTP (percent)
    pub fn rtp(&self) -> f64 {
        if self.total_wagered > 0 {
            (self.total_paid as f64 / self.total_wagered as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate (percent)
    pub fn hit_rate(&self) -> f64 {
        if self.cascades > 0 {
            (self.winning_cascades as f64 / self.cascades as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Bonus trigger rate (percent)
    pub fn trigger_rate(&self) -> f64 {
        if self.cascades > 0 {
            (self.bonus_triggers as f64 / self.cascades as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Fold another session into this one
    pub fn merge(&mut self, other: &SessionSnapshot) {
        self.cascades += other.cascades;
        self.spins += other.spins;
        self.bonus_spins += other.bonus_spins;
        self.winning_cascades += other.winning_cascades;
        self.bonus_triggers += other.bonus_triggers;
        self.total_wagered = self.total_wagered.saturating_add(other.total_wagered);
        self.total_paid = self.total_paid.saturating_add(other.total_paid);
        self.longest_cascade = self.longest_cascade.max(other.longest_cascade);
        self.largest_payout = self.largest_payout.max(other.largest_payout);
        self.errors += other.errors;
    }
}

/// Thread-safe statistics collector; share one across resolutions
#[derive(Debug, Default)]
pub struct SessionStats {
    inner: Mutex<SessionSnapshot>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the counters so far
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().clone()
    }

    pub fn reset(&self) {
        *self.inner.lock() = SessionSnapshot::default();
    }
}

impl SpinTelemetry for SessionStats {
    fn on_cascade_complete(&self, outcome: &CascadeOutcome) {
        let bonus = outcome.bonus_count() as u64;
        let mut stats = self.inner.lock();
        stats.cascades += 1;
        stats.spins += outcome.spins.len() as u64;
        stats.bonus_spins += bonus;
        if outcome.is_win() {
            stats.winning_cascades += 1;
        }
        if outcome.base().is_some_and(|b| b.triggers_bonus()) {
            stats.bonus_triggers += 1;
        }
        stats.total_wagered = stats.total_wagered.saturating_add(outcome.wager);
        stats.total_paid = stats.total_paid.saturating_add(outcome.total_payout);
        stats.longest_cascade = stats.longest_cascade.max(outcome.spins.len());
        stats.largest_payout = stats.largest_payout.max(outcome.total_payout);
    }

    fn on_error(&self, _error: &SpinError) {
        self.inner.lock().errors += 1;
    }
}

/// Fans events out to several sinks
pub struct Fanout<'a> {
    sinks: Vec<&'a dyn SpinTelemetry>,
}

impl<'a> Fanout<'a> {
    pub fn new(sinks: Vec<&'a dyn SpinTelemetry>) -> Self {
        Self { sinks }
    }
}

impl SpinTelemetry for Fanout<'_> {
    fn on_spin(&self, result: &SpinResult) {
        self.sinks.iter().for_each(|s| s.on_spin(result));
    }

    fn on_bonus_awarded(&self, awarded: u32, queued: u32) {
        self.sinks
            .iter()
            .for_each(|s| s.on_bonus_awarded(awarded, queued));
    }

    fn on_cascade_complete(&self, outcome: &CascadeOutcome) {
        self.sinks.iter().for_each(|s| s.on_cascade_complete(outcome));
    }

    fn on_error(&self, error: &SpinError) {
        self.sinks.iter().for_each(|s| s.on_error(error));
    }
}
