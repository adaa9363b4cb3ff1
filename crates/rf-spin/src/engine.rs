//! Spin orchestration and bonus cascades

use crate::config::MachineConfig;
use crate::error::{CascadeAborted, EngineResult, SpinError};
use crate::lines::{count_scatter, find_wins};
use crate::paytable::{apply_stake, calculate_pay};
use crate::reels::{SpinStops, spin_stops};
use crate::rng::StopSource;
use crate::spin::{CascadeOutcome, SpinKind, SpinResult};
use crate::telemetry::SpinTelemetry;

/// Slot machine
///
/// Holds an immutable [`MachineConfig`] and resolves spins against it. The
/// machine keeps no state between resolutions; randomness and diagnostics
/// are handed in per call, so one machine can serve many threads.
#[derive(Debug, Clone)]
pub struct SlotMachine {
    config: MachineConfig,
}

impl SlotMachine {
    /// Wrap a configuration. Structural checks run on first use; call
    /// [`MachineConfig::validate`] to check up front.
    pub fn new(config: MachineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn into_config(self) -> MachineConfig {
        self.config
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // WAGER
    // ═══════════════════════════════════════════════════════════════════════════

    /// Total stake for a bet: `bet × paylines`
    pub fn wager(&self, bet: i64) -> EngineResult<u64> {
        self.config.ensure_not_empty()?;
        let per_line = positive_bet(bet)?;
        per_line
            .checked_mul(self.config.paylines.len() as u64)
            .ok_or(SpinError::PayoutOverflow)
    }

    /// Wager for `bet`, or `InsufficientBalance` if it exceeds `balance`
    pub fn ensure_affordable(&self, bet: i64, balance: i64) -> EngineResult<u64> {
        let wager = self.wager(bet)?;
        let affordable = u64::try_from(balance).is_ok_and(|b| wager <= b);
        if !affordable {
            return Err(SpinError::InsufficientBalance { wager, balance });
        }
        Ok(wager)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SINGLE SPIN
    // ═══════════════════════════════════════════════════════════════════════════

    /// Draw stops and evaluate them
    pub fn spin_once<R: StopSource + ?Sized>(
        &self,
        kind: SpinKind,
        stake: u64,
        rng: &mut R,
    ) -> EngineResult<SpinResult> {
        let stops = spin_stops(&self.config.reels, rng)?;
        self.evaluate(kind, stake, stops)
    }

    /// Evaluate known stops: paylines, scatters, pay at `stake` per line
    pub fn evaluate(&self, kind: SpinKind, stake: u64, stops: SpinStops) -> EngineResult<SpinResult> {
        let config = &self.config;
        let mut win_lines = find_wins(&stops, &config.reels, &config.paylines, &config.special)?;
        let scatter_count = count_scatter(&stops, &config.reels, config.special.scatter);

        calculate_pay(&mut win_lines, &config.paytable)?;
        let pay = apply_stake(&mut win_lines, stake)?;

        Ok(SpinResult {
            kind,
            stops,
            stake,
            pay,
            win_lines,
            scatter_count,
            free_spins: config.bonus.free_spins_for(scatter_count),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CASCADE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resolve a base spin and every bonus spin it chains into.
    ///
    /// Checks run in order: configuration emptiness, the bet, then the bonus
    /// rules. The balance comparison belongs to the caller (see
    /// [`Self::play`]). On a mid-cascade failure the spins resolved so far
    /// come back inside [`CascadeAborted`].
    pub fn resolve<R: StopSource + ?Sized>(
        &self,
        bet: i64,
        rng: &mut R,
        telemetry: &dyn SpinTelemetry,
    ) -> Result<CascadeOutcome, CascadeAborted> {
        let checked = self
            .wager(bet)
            .and_then(|wager| self.config.bonus.validate().map(|()| wager));
        let wager = match checked {
            Ok(wager) => wager,
            Err(err) => {
                telemetry.on_error(&err);
                return Err(CascadeAborted::before_start(err));
            }
        };

        let mut outcome = CascadeOutcome::new(wager);
        // wager() already rejected non-positive bets
        let stake = bet.unsigned_abs();

        match self.run_cascade(stake, rng, telemetry, &mut outcome) {
            Ok(()) => {
                telemetry.on_cascade_complete(&outcome);
                Ok(outcome)
            }
            Err(source) => {
                telemetry.on_error(&source);
                Err(CascadeAborted {
                    partial: outcome,
                    source,
                })
            }
        }
    }

    /// `ensure_affordable`, then `resolve`
    pub fn play<R: StopSource + ?Sized>(
        &self,
        bet: i64,
        balance: i64,
        rng: &mut R,
        telemetry: &dyn SpinTelemetry,
    ) -> Result<CascadeOutcome, CascadeAborted> {
        if let Err(err) = self.ensure_affordable(bet, balance) {
            telemetry.on_error(&err);
            return Err(CascadeAborted::before_start(err));
        }
        self.resolve(bet, rng, telemetry)
    }

    fn run_cascade<R: StopSource + ?Sized>(
        &self,
        stake: u64,
        rng: &mut R,
        telemetry: &dyn SpinTelemetry,
        outcome: &mut CascadeOutcome,
    ) -> EngineResult<()> {
        let rules = &self.config.bonus;

        let base = self.spin_once(SpinKind::Base, stake, rng)?;
        telemetry.on_spin(&base);
        let mut remaining = base.free_spins;
        outcome.total_payout = base.pay;
        outcome.spins.push(base);

        if remaining == 0 {
            return Ok(());
        }
        telemetry.on_bonus_awarded(remaining, remaining);

        let bonus_stake = stake
            .checked_mul(rules.bonus_stake_multiplier)
            .ok_or(SpinError::PayoutOverflow)?;
        let mut played: u32 = 0;

        while remaining > 0 {
            remaining -= 1;

            let spin = self.spin_once(SpinKind::Bonus, bonus_stake, rng)?;
            telemetry.on_spin(&spin);
            if spin.free_spins > 0 {
                remaining = remaining
                    .checked_add(spin.free_spins)
                    .ok_or(SpinError::PayoutOverflow)?;
                telemetry.on_bonus_awarded(spin.free_spins, remaining);
            }
            outcome.total_payout = outcome
                .total_payout
                .checked_add(spin.pay)
                .ok_or(SpinError::PayoutOverflow)?;
            outcome.spins.push(spin);

            played = played.wrapping_add(1);
            if rules.yield_every > 0 && played % rules.yield_every == 0 {
                std::thread::yield_now();
            }
        }

        Ok(())
    }
}

impl From<MachineConfig> for SlotMachine {
    fn from(config: MachineConfig) -> Self {
        Self::new(config)
    }
}

fn positive_bet(bet: i64) -> EngineResult<u64> {
    if bet <= 0 {
        return Err(SpinError::InvalidBet(bet));
    }
    Ok(bet.unsigned_abs())
}
