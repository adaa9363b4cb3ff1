//! Batch simulation across a rayon pool
//!
//! Spins are split into fixed-size chunks; chunk `i` draws from stream `i`
//! of the seeded generator. Reports depend only on the machine, bet, seed
//! and spin count, never on the thread count.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::SlotMachine;
use crate::error::SimulationError;
use crate::rng::ReelRng;
use crate::telemetry::{SessionSnapshot, SessionStats};

/// Spins per independent randomness stream
pub const CHUNK_SPINS: u64 = 4096;

/// Batch parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Base spins to resolve
    pub spins: u64,
    /// Per-line bet
    pub bet: i64,
    pub seed: u64,
    /// Worker threads (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spins: 100_000,
            bet: 1,
            seed: 0,
            threads: None,
        }
    }
}

/// Aggregate result of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub machine: String,
    pub spins: u64,
    pub bet: i64,
    pub seed: u64,
    pub stats: SessionSnapshot,
}

impl SimulationReport {
    /// Return to player (percent)
    pub fn rtp(&self) -> f64 {
        self.stats.rtp()
    }

    /// Share of base spins whose cascade paid (percent)
    pub fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    /// Share of base spins that triggered bonus spins (percent)
    pub fn trigger_rate(&self) -> f64 {
        self.stats.trigger_rate()
    }

    /// Mean bonus spins per trigger
    pub fn mean_bonus_length(&self) -> f64 {
        if self.stats.bonus_triggers > 0 {
            self.stats.bonus_spins as f64 / self.stats.bonus_triggers as f64
        } else {
            0.0
        }
    }
}

/// Resolve `config.spins` cascades and aggregate their statistics
pub fn simulate(
    machine: &SlotMachine,
    config: &SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    // Surface a bad bet or machine once, before fanning out
    machine.wager(config.bet)?;

    let chunks = config.spins.div_ceil(CHUNK_SPINS);
    log::info!(
        "[Simulate] {} spins at bet {} in {} chunk(s), seed {}",
        config.spins,
        config.bet,
        chunks,
        config.seed
    );

    let run = || {
        (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * CHUNK_SPINS;
                let count = CHUNK_SPINS.min(config.spins - start);
                run_chunk(machine, config, chunk, count)
            })
            .collect::<Result<Vec<_>, SimulationError>>()
    };

    let snapshots = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()?
            .install(run)?,
        None => run()?,
    };

    let mut stats = SessionSnapshot::default();
    for snapshot in &snapshots {
        stats.merge(snapshot);
    }

    let report = SimulationReport {
        machine: machine.config().name.clone(),
        spins: config.spins,
        bet: config.bet,
        seed: config.seed,
        stats,
    };
    log::info!(
        "[Simulate] RTP {:.2}%, hit rate {:.2}%, trigger rate {:.3}%",
        report.rtp(),
        report.hit_rate(),
        report.trigger_rate()
    );
    Ok(report)
}

fn run_chunk(
    machine: &SlotMachine,
    config: &SimulationConfig,
    chunk: u64,
    count: u64,
) -> Result<SessionSnapshot, SimulationError> {
    let mut rng = ReelRng::stream(config.seed, chunk);
    let stats = SessionStats::new();
    for _ in 0..count {
        machine
            .resolve(config.bet, &mut rng, &stats)
            .map_err(|aborted| SimulationError::Spin(aborted.source))?;
    }
    Ok(stats.snapshot())
}
