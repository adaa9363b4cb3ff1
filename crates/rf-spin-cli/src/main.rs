//! rfspin: operator CLI for the rf-spin engine
//!
//! Usage:
//!   rfspin describe [--yaml]                  - Print the machine
//!   rfspin wager --bet N [--balance B]        - Wager for a bet
//!   rfspin spin --bet N --balance B [--json]  - Resolve one paid spin
//!   rfspin simulate --spins N --bet N         - Batch RTP report
//!
//! `--machine <file>` selects a JSON/YAML machine; the Atkins Diet preset is
//! used otherwise.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use rf_spin::presets;
use rf_spin::{
    CascadeOutcome, LogTelemetry, MachineConfig, ReelRng, SimulationConfig, SimulationReport,
    SlotMachine, SpinResult, simulate,
};

#[derive(Parser)]
#[command(name = "rfspin", about = "Slot machine spin resolution", version)]
struct Cli {
    /// Machine file (.json, .yaml, .yml) or preset name
    #[arg(short, long, global = true)]
    machine: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a machine summary
    Describe {
        /// Dump the full machine as YAML
        #[arg(long)]
        yaml: bool,
    },
    /// Compute the wager for a bet
    Wager {
        /// Per-line bet
        #[arg(short, long)]
        bet: i64,
        /// Check the wager against a balance
        #[arg(long)]
        balance: Option<i64>,
    },
    /// Resolve one paid spin and its bonus cascade
    Spin {
        /// Per-line bet
        #[arg(short, long)]
        bet: i64,
        /// Player balance
        #[arg(long)]
        balance: i64,
        /// Seed for a reproducible spin
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a batch of spins and report RTP
    Simulate {
        /// Base spins to resolve
        #[arg(short = 'n', long, default_value_t = 100_000)]
        spins: u64,
        /// Per-line bet
        #[arg(short, long, default_value_t = 1)]
        bet: i64,
        /// Seed for the per-chunk streams
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Worker threads
        #[arg(short, long)]
        threads: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let machine = SlotMachine::new(load_machine(cli.machine.as_deref())?);

    match cli.command {
        Commands::Describe { yaml } => describe(&machine, yaml),
        Commands::Wager { bet, balance } => wager(&machine, bet, balance),
        Commands::Spin {
            bet,
            balance,
            seed,
            json,
        } => spin(&machine, bet, balance, seed, json),
        Commands::Simulate {
            spins,
            bet,
            seed,
            threads,
            json,
        } => run_simulation(
            &machine,
            SimulationConfig {
                spins,
                bet,
                seed,
                threads,
            },
            json,
        ),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_machine(selector: Option<&str>) -> Result<MachineConfig> {
    let Some(selector) = selector else {
        return Ok(presets::atkins_diet());
    };

    let path = Path::new(selector);
    if path.exists() {
        return MachineConfig::load(path)
            .with_context(|| format!("Failed to load machine from {}", path.display()));
    }
    if let Some(preset) = presets::by_name(selector) {
        return Ok(preset);
    }
    bail!(
        "No machine file or preset named '{}' (presets: {})",
        selector,
        presets::all_presets()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

fn describe(machine: &SlotMachine, yaml: bool) -> Result<()> {
    let config = machine.config();
    config.validate().context("Machine failed validation")?;

    if yaml {
        print!("{}", config.to_yaml().context("Failed to serialize machine")?);
        return Ok(());
    }

    println!("{}", display_name(config));
    println!(
        "  reels:    {} ({} stops)",
        config.reels.columns(),
        config
            .reels
            .iter()
            .map(|s| s.len().to_string())
            .collect::<Vec<_>>()
            .join("/")
    );
    println!("  paylines: {}", config.paylines.len());
    println!("  wildcard: {}", config.symbol_name(config.special.wildcard));
    println!("  scatter:  {}", config.symbol_name(config.special.scatter));
    println!(
        "  bonus:    {}+ scatters award {} spins at {}x stake",
        config.bonus.scatter_trigger,
        config.bonus.free_spins_awarded,
        config.bonus.bonus_stake_multiplier
    );
    println!("  paytable:");
    for (symbol, pays) in &config.paytable.entries {
        let row = pays
            .iter()
            .rev()
            .map(|(count, pay)| format!("{count}x={pay}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("    {:<14} {}", config.symbol_name(*symbol), row);
    }
    Ok(())
}

fn wager(machine: &SlotMachine, bet: i64, balance: Option<i64>) -> Result<()> {
    let wager = match balance {
        Some(balance) => machine.ensure_affordable(bet, balance)?,
        None => machine.wager(bet)?,
    };
    println!(
        "Wager: {} ({} x {} paylines)",
        wager,
        bet,
        machine.config().paylines.len()
    );
    if let Some(balance) = balance {
        println!("Affordable with balance {}", balance);
    }
    Ok(())
}

fn spin(machine: &SlotMachine, bet: i64, balance: i64, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => ReelRng::seeded(seed),
        None => ReelRng::from_entropy(),
    };

    let outcome = match machine.play(bet, balance, &mut rng, &LogTelemetry) {
        Ok(outcome) => outcome,
        Err(aborted) => {
            if !aborted.partial.spins.is_empty() {
                print_outcome(machine.config(), &aborted.partial, balance);
            }
            return Err(aborted).context("Spin failed");
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
    } else {
        print_outcome(machine.config(), &outcome, balance);
    }
    Ok(())
}

fn run_simulation(machine: &SlotMachine, config: SimulationConfig, json: bool) -> Result<()> {
    let report = simulate(machine, &config).context("Simulation failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print_report(&report);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

fn display_name(config: &MachineConfig) -> &str {
    if config.name.is_empty() {
        "(unnamed machine)"
    } else {
        &config.name
    }
}

fn print_outcome(config: &MachineConfig, outcome: &CascadeOutcome, balance: i64) {
    for (index, spin) in outcome.spins.iter().enumerate() {
        print_spin(config, index + 1, spin);
    }

    let closing = i128::from(balance) - i128::from(outcome.wager) + i128::from(outcome.total_payout);
    println!();
    println!(
        "Wager {}  Paid {}  Bonus spins {}  Balance {} -> {}",
        outcome.wager,
        outcome.total_payout,
        outcome.bonus_count(),
        balance,
        closing
    );
}

fn print_spin(config: &MachineConfig, number: usize, spin: &SpinResult) {
    // Stops are shown 1-based
    println!(
        "#{:<3} {:<5} stops {:?}  pay {}  scatters {}{}",
        number,
        spin.kind,
        spin.stops.display_positions(),
        spin.pay,
        spin.scatter_count,
        if spin.free_spins > 0 {
            format!("  +{} free spins", spin.free_spins)
        } else {
            String::new()
        }
    );
    for win in &spin.win_lines {
        let symbols = win
            .symbols
            .iter()
            .map(|s| config.symbol_name(*s))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "       line {:>2}: {} x {} [{}] -> {}",
            win.line,
            win.count,
            config.symbol_name(win.symbol),
            symbols,
            win.payout
        );
    }
}

fn print_report(report: &SimulationReport) {
    let stats = &report.stats;
    println!(
        "{} - {} spins at bet {} (seed {})",
        report.machine, report.spins, report.bet, report.seed
    );
    println!("  RTP:            {:.3}%", report.rtp());
    println!("  hit rate:       {:.3}%", report.hit_rate());
    println!("  trigger rate:   {:.4}%", report.trigger_rate());
    println!("  mean bonus run: {:.2}", report.mean_bonus_length());
    println!("  wagered:        {}", stats.total_wagered);
    println!("  paid:           {}", stats.total_paid);
    println!("  largest payout: {}", stats.largest_payout);
    println!("  longest chain:  {} spins", stats.longest_cascade);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_spin() {
        let cli = Cli::parse_from(["rfspin", "-vv", "spin", "--bet", "2", "--balance", "100", "--seed", "4"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Spin { bet: 2, balance: 100, seed: Some(4), json: false }
        ));
    }

    #[test]
    fn test_load_preset_by_name() {
        assert_eq!(load_machine(None).unwrap().name, "Atkins Diet");
        assert_eq!(load_machine(Some("atkins-diet")).unwrap().name, "Atkins Diet");
        assert!(load_machine(Some("no-such-machine")).is_err());
    }

    #[test]
    fn test_load_machine_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.json");
        std::fs::write(&path, presets::atkins_diet().to_json_pretty().unwrap()).unwrap();
        let loaded = load_machine(path.to_str()).unwrap();
        assert_eq!(loaded, presets::atkins_diet());
    }
}
