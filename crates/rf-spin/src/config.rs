//! Machine configuration
//!
//! A machine is pure data: reels, paylines, paytable, special symbols and
//! the bonus rules. Swapping the configuration yields a different machine
//! without touching engine logic.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineResult, SpinError};
use crate::paytable::{PayTable, Payline};
use crate::symbols::{ReelSet, SpecialSymbols, Symbol};

/// Free-spin trigger and cascade rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRules {
    /// Scatters needed (at least) to grant bonus spins
    pub scatter_trigger: u32,
    /// Bonus spins granted per trigger
    pub free_spins_awarded: u32,
    /// Bonus spins pay at `bet × bonus_stake_multiplier` per line
    pub bonus_stake_multiplier: u64,
    /// Yield the thread after this many bonus spins (0 = never)
    pub yield_every: u32,
}

impl Default for BonusRules {
    fn default() -> Self {
        Self {
            scatter_trigger: 3,
            free_spins_awarded: 10,
            bonus_stake_multiplier: 3,
            yield_every: 16,
        }
    }
}

impl BonusRules {
    /// A zero trigger would grant bonus spins on every spin, so the
    /// cascade could never drain.
    pub fn validate(&self) -> EngineResult<()> {
        if self.scatter_trigger == 0 {
            return Err(SpinError::InvalidBonusRules(
                "scatter_trigger must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Bonus spins granted for a scatter count
    pub fn free_spins_for(&self, scatter_count: u32) -> u32 {
        if scatter_count >= self.scatter_trigger {
            self.free_spins_awarded
        } else {
            0
        }
    }
}

/// Complete configuration of one machine variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// One strip per column
    pub reels: ReelSet,
    /// Paylines in payout order (reported 1-based)
    pub paylines: Vec<Payline>,
    /// Pay by symbol and run length
    pub paytable: PayTable,
    /// Wildcard and scatter roles
    pub special: SpecialSymbols,
    /// Free-spin rules
    #[serde(default)]
    pub bonus: BonusRules,
    /// Optional display names per symbol
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub symbol_names: BTreeMap<Symbol, String>,
}

impl MachineConfig {
    pub fn new(
        reels: ReelSet,
        paylines: Vec<Payline>,
        paytable: PayTable,
        special: SpecialSymbols,
    ) -> Self {
        Self {
            name: String::new(),
            reels,
            paylines,
            paytable,
            special,
            bonus: BonusRules::default(),
            symbol_names: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_bonus(mut self, bonus: BonusRules) -> Self {
        self.bonus = bonus;
        self
    }

    /// Display name for a symbol, falling back to its code
    pub fn symbol_name(&self, symbol: Symbol) -> String {
        self.symbol_names
            .get(&symbol)
            .cloned()
            .unwrap_or_else(|| symbol.to_string())
    }

    /// Reels and paylines are present and no strip is empty
    pub fn ensure_not_empty(&self) -> EngineResult<()> {
        if self.reels.is_empty() {
            return Err(SpinError::EmptyConfiguration("reel set has no strips"));
        }
        if self.reels.first_empty_strip().is_some() {
            return Err(SpinError::EmptyConfiguration("reel strip has no symbols"));
        }
        if self.paylines.is_empty() {
            return Err(SpinError::EmptyConfiguration("no paylines"));
        }
        Ok(())
    }

    /// Full structural check, run when a machine is loaded
    pub fn validate(&self) -> EngineResult<()> {
        self.ensure_not_empty()?;

        let columns = self.reels.columns();
        for (index, line) in self.paylines.iter().enumerate() {
            if line.columns() != columns {
                return Err(SpinError::DimensionMismatch(format!(
                    "payline {} spans {} columns, reel set has {}",
                    index + 1,
                    line.columns(),
                    columns
                )));
            }
            if line.columns() < crate::lines::MIN_RUN {
                return Err(SpinError::DimensionMismatch(format!(
                    "payline {} spans {} column(s), at least {} needed",
                    index + 1,
                    line.columns(),
                    crate::lines::MIN_RUN
                )));
            }
            if let Some((column, offset)) = line.invalid_offset() {
                return Err(SpinError::InvalidRowOffset {
                    line: index + 1,
                    column: column + 1,
                    offset,
                });
            }
        }

        self.bonus.validate()?;

        if !self.reels.contains(self.special.wildcard) {
            log::debug!(
                "[Machine {}] wildcard {} never lands; substitution disabled",
                self.name,
                self.special.wildcard
            );
        }
        if !self.reels.contains(self.special.scatter) {
            log::debug!(
                "[Machine {}] scatter {} never lands; bonus spins disabled",
                self.name,
                self.special.scatter
            );
        }

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON machine
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML machine
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a machine file, picking the format from its extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let text = std::fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        log::info!(
            "Loaded machine '{}' from {:?}: {} reels, {} paylines",
            config.name,
            path,
            config.reels.columns(),
            config.paylines.len()
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }
}
