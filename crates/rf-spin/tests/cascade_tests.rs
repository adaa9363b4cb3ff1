//! Spin resolution scenarios
//!
//! End-to-end checks over the public API: payline wins, scatter triggers,
//! bonus cascades, wager rules and reproducibility.

use rf_spin::presets::{atkins::*, atkins_diet};
use rf_spin::{
    CascadeOutcome, LogTelemetry, MachineConfig, NullTelemetry, PayTable, Payline, ReelRng,
    ReelSet, ScriptedStops, SessionStats, SlotMachine, SpecialSymbols, SpinError, SpinKind,
    SpinStops, Symbol, count_scatter, wrap,
};

// ═══════════════════════════════════════════════════════════════════════════════
// TEST FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

/// Atkins stops showing exactly three scatters (reels 1-3)
const THREE_SCATTERS: [usize; 5] = [0, 20, 3, 10, 10];

/// Atkins stops showing no scatter at all
const NO_SCATTERS: [usize; 5] = [10, 10, 10, 10, 10];

fn atkins() -> SlotMachine {
    SlotMachine::new(atkins_diet())
}

/// Base spin on `base`, then `quiet` spins on stops without scatters
fn scripted(base: &[usize], quiet: usize) -> ScriptedStops {
    let mut values = base.to_vec();
    for _ in 0..quiet {
        values.extend_from_slice(&NO_SCATTERS);
    }
    ScriptedStops::new(values)
}

fn two_reel_machine() -> SlotMachine {
    const A: u32 = 1;
    const B: u32 = 2;
    const C: u32 = 3;
    SlotMachine::new(MachineConfig::new(
        ReelSet::from_codes(&[&[A, B], &[A, C]]),
        vec![Payline::new(vec![2, 2])],
        PayTable::new().with_pays(A, &[(2, 7)]),
        SpecialSymbols::new(100, 101),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAYLINES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_two_reel_center_line_pays() {
    let machine = two_reel_machine();
    let result = machine
        .evaluate(SpinKind::Base, 1, SpinStops::new(vec![0, 0]))
        .unwrap();

    assert_eq!(result.win_lines.len(), 1);
    let win = &result.win_lines[0];
    assert_eq!(win.line, 1);
    assert_eq!(win.symbol, Symbol(1));
    assert_eq!(win.count, 2);
    assert_eq!(win.payout, 7);
    assert_eq!(result.pay, 7);
}

#[test]
fn test_no_win_line_shorter_than_two() {
    let machine = atkins();
    let mut rng = ReelRng::seeded(11);
    for _ in 0..2_000 {
        let result = machine.spin_once(SpinKind::Base, 1, &mut rng).unwrap();
        assert!(result.win_lines.iter().all(|w| w.count >= 2));
        assert!(result.win_lines.iter().all(|w| w.count == w.symbols.len()));
        let sum: u64 = result.win_lines.iter().map(|w| w.payout).sum();
        assert_eq!(sum, result.pay);
    }
}

#[test]
fn test_atkins_leading_wild_pays_next_symbol() {
    // Reel 1 stop 19 centers ATKINS; reel 2 stop 17 centers BACON
    let machine = atkins();
    let result = machine
        .evaluate(SpinKind::Base, 1, SpinStops::new(vec![19, 17, 9, 0, 0]))
        .unwrap();
    let middle = result.win_lines.iter().find(|w| w.line == 1).unwrap();
    assert_eq!(middle.symbol, Symbol(BACON));
    assert_eq!(middle.symbols[0], Symbol(BACON));
    assert_eq!(middle.symbols[2], Symbol(BACON));
    assert!(middle.count >= 3);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCATTERS AND CASCADES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_all_scatter_machine_counts_every_cell() {
    for reels in 1..=6 {
        let strip: &[u32] = &[SCALE, SCALE, SCALE];
        let set = ReelSet::from_codes(&vec![strip; reels]);
        let stops = SpinStops::new(vec![1; reels]);
        assert_eq!(count_scatter(&stops, &set, Symbol(SCALE)), 3 * reels as u32);
    }
}

#[test]
fn test_three_scatters_trigger_ten_bonus_spins() {
    let machine = atkins();
    let mut rng = scripted(&THREE_SCATTERS, 10);
    let outcome = machine.resolve(2, &mut rng, &NullTelemetry).unwrap();

    let base = outcome.base().unwrap();
    assert_eq!(base.scatter_count, 3);
    assert_eq!(base.free_spins, 10);
    assert_eq!(base.stake, 2);

    assert_eq!(outcome.bonus_count(), 10);
    assert!(outcome.bonus_spins().all(|s| s.stake == 6));
    assert!(outcome.bonus_spins().all(|s| s.scatter_count == 0));

    let sum: u64 = outcome.spins.iter().map(|s| s.pay).sum();
    assert_eq!(outcome.total_payout, sum);
    assert_eq!(outcome.wager, 40);
}

#[test]
fn test_bonus_pays_triple_base() {
    let machine = atkins();
    let base = machine
        .evaluate(SpinKind::Base, 1, SpinStops::new(NO_SCATTERS.to_vec()))
        .unwrap();
    let bonus = machine
        .evaluate(SpinKind::Bonus, 3, SpinStops::new(NO_SCATTERS.to_vec()))
        .unwrap();
    assert_eq!(bonus.pay, base.pay * 3);
    assert_eq!(bonus.win_lines.len(), base.win_lines.len());
}

#[test]
fn test_no_scatter_single_spin_outcome() {
    let machine = atkins();
    let mut rng = scripted(&NO_SCATTERS, 0);
    let outcome = machine.resolve(1, &mut rng, &NullTelemetry).unwrap();
    assert_eq!(outcome.spins.len(), 1);
    assert_eq!(outcome.spins[0].kind, SpinKind::Base);
    assert_eq!(outcome.total_payout, outcome.spins[0].pay);
}

#[test]
fn test_unvalidated_machine_aborts_with_partial() {
    let mut config = atkins_diet();
    config.paylines.push(Payline::straight(2, 4));
    let machine = SlotMachine::new(config);

    let mut rng = scripted(&NO_SCATTERS, 0);
    let err = machine.resolve(1, &mut rng, &NullTelemetry).unwrap_err();
    assert!(matches!(err.error(), SpinError::DimensionMismatch(_)));
    assert_eq!(err.partial.wager, 21);
    assert!(err.partial.spins.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// WAGER AND BET RULES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wager_matches_paylines() {
    let machine = atkins();
    for bet in 1..=200_i64 {
        assert_eq!(machine.wager(bet).unwrap(), bet as u64 * 20);
    }
}

#[test]
fn test_non_positive_bet_rejected() {
    let machine = atkins();
    let mut rng = ReelRng::seeded(1);
    for bet in [0, -1, i64::MIN] {
        let err = machine.resolve(bet, &mut rng, &NullTelemetry).unwrap_err();
        assert_eq!(err.source, SpinError::InvalidBet(bet));
    }
}

#[test]
fn test_empty_reel_set_rejected_for_any_bet() {
    let mut config = atkins_diet();
    config.reels = ReelSet::default();
    let machine = SlotMachine::new(config);
    let mut rng = ReelRng::seeded(1);
    for bet in [-5, 0, 1, 50] {
        let err = machine.resolve(bet, &mut rng, &NullTelemetry).unwrap_err();
        assert!(matches!(err.source, SpinError::EmptyConfiguration(_)));
    }
}

#[test]
fn test_play_enforces_balance() {
    let machine = atkins();
    let mut rng = ReelRng::seeded(5);
    let err = machine.play(1, 19, &mut rng, &NullTelemetry).unwrap_err();
    assert_eq!(
        err.source,
        SpinError::InsufficientBalance { wager: 20, balance: 19 }
    );
    assert!(machine.play(1, 20, &mut rng, &NullTelemetry).is_ok());
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPRODUCIBILITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_identical_stops_serialize_identically() {
    let machine = atkins();
    let first = machine
        .resolve(3, &mut scripted(&THREE_SCATTERS, 10), &NullTelemetry)
        .unwrap();
    let second = machine
        .resolve(3, &mut scripted(&THREE_SCATTERS, 10), &LogTelemetry)
        .unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let parsed: CascadeOutcome = serde_json::from_str(&serde_json::to_string(&first).unwrap()).unwrap();
    assert_eq!(parsed, first);
}

#[test]
fn test_seeded_sessions_repeat() {
    let machine = atkins();
    let run = |seed| {
        let mut rng = ReelRng::seeded(seed);
        (0..200)
            .map(|_| machine.resolve(1, &mut rng, &NullTelemetry).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_shared_machine_across_threads() {
    let machine = atkins();
    let stats = SessionStats::new();
    std::thread::scope(|scope| {
        for worker in 0..4 {
            let machine = &machine;
            let stats = &stats;
            scope.spawn(move || {
                let mut rng = ReelRng::stream(9, worker);
                for _ in 0..250 {
                    machine.resolve(1, &mut rng, stats).unwrap();
                }
            });
        }
    });
    let snap = stats.snapshot();
    assert_eq!(snap.cascades, 1_000);
    assert_eq!(snap.total_wagered, 20_000);
}

#[test]
fn test_wrap_reference_values() {
    assert_eq!(wrap(6, 7), 0);
    assert_eq!(wrap(6, -2), 5);
    assert_eq!(wrap(1, -2), 0);
}
