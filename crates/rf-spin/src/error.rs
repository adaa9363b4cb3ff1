//! Error types for spin resolution

use thiserror::Error;

use crate::spin::CascadeOutcome;

/// Engine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpinError {
    #[error("Empty configuration: {0}")]
    EmptyConfiguration(&'static str),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid row offset {offset} on payline {line}, column {column} (expected 1..=3)")]
    InvalidRowOffset { line: usize, column: usize, offset: u8 },

    #[error("Invalid bonus rules: {0}")]
    InvalidBonusRules(String),

    #[error("Invalid bet: {0} (must be greater than 0)")]
    InvalidBet(i64),

    #[error("Insufficient balance: wager {wager} exceeds balance {balance}")]
    InsufficientBalance { wager: u64, balance: i64 },

    #[error("Payout overflow")]
    PayoutOverflow,
}

/// Result type alias
pub type EngineResult<T> = Result<T, SpinError>;

/// A cascade that stopped on an error.
///
/// Carries everything resolved before the failure so the caller can decide
/// whether the partial payout is honored.
#[derive(Error, Debug, Clone)]
#[error("spin aborted after {} resolved spin(s): {source}", .partial.spins.len())]
pub struct CascadeAborted {
    /// Spins resolved before the failure and their running total
    pub partial: CascadeOutcome,
    /// First failure encountered
    #[source]
    pub source: SpinError,
}

impl CascadeAborted {
    /// Failure before any spin was resolved
    pub fn before_start(source: SpinError) -> Self {
        Self {
            partial: CascadeOutcome::default(),
            source,
        }
    }

    /// Underlying engine error
    pub fn error(&self) -> &SpinError {
        &self.source
    }
}

impl From<SpinError> for CascadeAborted {
    fn from(source: SpinError) -> Self {
        Self::before_start(source)
    }
}

/// Machine configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid machine: {0}")]
    Invalid(#[from] SpinError),
}

/// Batch simulation errors
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Spin failed: {0}")]
    Spin(#[from] SpinError),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
