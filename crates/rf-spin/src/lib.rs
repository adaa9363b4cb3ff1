//! # rf-spin — Spin Resolution Engine
//!
//! Resolves one paid spin of a line-based video slot into a payout: random
//! reel stops, payline wins with wildcard substitution, scatter counting,
//! paytable pricing and the chain of free bonus spins a scatter trigger
//! starts.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine (immutable MachineConfig)
//!     │
//!     ├── ReelSet + StopSource ──> SpinStops
//!     ├── Paylines + SpecialSymbols ──> Vec<WinLine>
//!     ├── scatter ──> scatter count ──> BonusRules
//!     └── PayTable ──> pay × stake
//!           │
//!           v
//!     CascadeOutcome (base spin, bonus spins, total)
//!           │
//!           v
//!     SpinTelemetry (log / session stats)
//! ```
//!
//! Machines are data: build one with [`MachineConfig`], load one from JSON
//! or YAML, or start from [`presets`].

pub mod config;
pub mod engine;
pub mod error;
pub mod lines;
pub mod paytable;
pub mod presets;
pub mod reels;
pub mod rng;
pub mod simulate;
pub mod spin;
pub mod symbols;
pub mod telemetry;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use lines::*;
pub use paytable::*;
pub use reels::*;
pub use rng::*;
pub use simulate::*;
pub use spin::*;
pub use symbols::*;
pub use telemetry::*;
