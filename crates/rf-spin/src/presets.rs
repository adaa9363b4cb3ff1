//! Built-in machine presets

use std::collections::BTreeMap;

use crate::config::{BonusRules, MachineConfig};
use crate::paytable::{PayTable, Payline};
use crate::symbols::{ReelSet, SpecialSymbols, Symbol};

/// Symbol codes of the Atkins Diet machine
pub mod atkins {
    pub const EMPTY: u32 = 0;
    /// Wildcard
    pub const ATKINS: u32 = 1;
    pub const STEAK: u32 = 2;
    pub const HAM: u32 = 3;
    pub const BUFFALO_WINGS: u32 = 4;
    pub const SAUSAGE: u32 = 5;
    pub const EGGS: u32 = 6;
    pub const BUTTER: u32 = 7;
    pub const CHEESE: u32 = 8;
    pub const BACON: u32 = 9;
    pub const MAYONNAISE: u32 = 10;
    /// Scatter
    pub const SCALE: u32 = 11;

    pub const NAMES: [(u32, &str); 12] = [
        (EMPTY, "EMPTY"),
        (ATKINS, "ATKINS"),
        (STEAK, "STEAK"),
        (HAM, "HAM"),
        (BUFFALO_WINGS, "BUFFALO_WINGS"),
        (SAUSAGE, "SAUSAGE"),
        (EGGS, "EGGS"),
        (BUTTER, "BUTTER"),
        (CHEESE, "CHEESE"),
        (BACON, "BACON"),
        (MAYONNAISE, "MAYONNAISE"),
        (SCALE, "SCALE"),
    ];
}

use atkins::*;

/// Get all built-in presets
pub fn all_presets() -> Vec<MachineConfig> {
    vec![atkins_diet()]
}

/// Look up a preset by name, case-insensitively, ignoring spaces and dashes
pub fn by_name(name: &str) -> Option<MachineConfig> {
    let wanted = normalize(name);
    all_presets()
        .into_iter()
        .find(|preset| normalize(&preset.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Atkins Diet: 5 reels of 32 stops, 20 paylines, ATKINS wild, SCALE scatter
pub fn atkins_diet() -> MachineConfig {
    let mut config = MachineConfig::new(
        ReelSet::from_codes(ATKINS_REELS),
        ATKINS_PAYLINES.iter().map(|rows| Payline::new(rows.to_vec())).collect(),
        atkins_paytable(),
        SpecialSymbols::new(ATKINS, SCALE),
    )
    .with_name("Atkins Diet")
    .with_bonus(BonusRules::default());

    config.symbol_names = NAMES
        .iter()
        .map(|&(code, name)| (Symbol(code), name.to_string()))
        .collect::<BTreeMap<_, _>>();
    config
}

fn atkins_paytable() -> PayTable {
    PayTable::new()
        .with_pays(ATKINS, &[(5, 5000), (4, 500), (3, 50), (2, 5)])
        .with_pays(STEAK, &[(5, 1000), (4, 200), (3, 40), (2, 3)])
        .with_pays(HAM, &[(5, 500), (4, 150), (3, 30), (2, 2)])
        .with_pays(BUFFALO_WINGS, &[(5, 300), (4, 100), (3, 25), (2, 2)])
        .with_pays(SAUSAGE, &[(5, 200), (4, 75), (3, 20)])
        .with_pays(EGGS, &[(5, 200), (4, 75), (3, 20)])
        .with_pays(BUTTER, &[(5, 100), (4, 50), (3, 15)])
        .with_pays(CHEESE, &[(5, 100), (4, 50), (3, 15)])
        .with_pays(BACON, &[(5, 50), (4, 25), (3, 10)])
        .with_pays(MAYONNAISE, &[(5, 50), (4, 25), (3, 10)])
}

const ATKINS_PAYLINES: [[u8; 5]; 20] = [
    [2, 2, 2, 2, 2],
    [1, 1, 1, 1, 1],
    [3, 3, 3, 3, 3],
    [1, 2, 3, 2, 1],
    [3, 2, 1, 2, 3],
    [2, 1, 1, 1, 2],
    [2, 3, 3, 3, 2],
    [1, 1, 2, 3, 3],
    [3, 3, 2, 1, 1],
    [2, 1, 2, 3, 2],
    [2, 3, 2, 1, 2],
    [1, 2, 2, 2, 1],
    [3, 2, 2, 2, 3],
    [1, 2, 1, 2, 1],
    [3, 2, 3, 2, 3],
    [2, 2, 1, 2, 2],
    [2, 2, 3, 2, 2],
    [1, 1, 3, 1, 1],
    [3, 3, 1, 3, 3],
    [1, 3, 3, 3, 1],
];

#[rustfmt::skip]
const ATKINS_REELS: &[&[u32]] = &[
    // Reel 1
    &[
        SCALE, MAYONNAISE, HAM, SAUSAGE, BACON, EGGS,
        CHEESE, MAYONNAISE, SAUSAGE, BUTTER, BUFFALO_WINGS, BACON,
        EGGS, MAYONNAISE, STEAK, BUFFALO_WINGS, BUTTER, CHEESE,
        EGGS, ATKINS, BACON, MAYONNAISE, HAM, CHEESE,
        EGGS, SCALE, BUTTER, BACON, SAUSAGE, BUFFALO_WINGS,
        STEAK, BUTTER,
    ],
    // Reel 2
    &[
        MAYONNAISE, BUFFALO_WINGS, STEAK, SAUSAGE, CHEESE, MAYONNAISE,
        HAM, BUTTER, BACON, STEAK, SAUSAGE, MAYONNAISE,
        HAM, ATKINS, BUTTER, EGGS, CHEESE, BACON,
        SAUSAGE, BUFFALO_WINGS, SCALE, MAYONNAISE, BUTTER, CHEESE,
        BACON, EGGS, BUFFALO_WINGS, MAYONNAISE, STEAK, HAM,
        CHEESE, BACON,
    ],
    // Reel 3
    &[
        HAM, BUTTER, EGGS, SCALE, CHEESE, MAYONNAISE,
        BUTTER, HAM, SAUSAGE, BACON, STEAK, BUFFALO_WINGS,
        BUTTER, MAYONNAISE, CHEESE, SAUSAGE, EGGS, BACON,
        MAYONNAISE, BUFFALO_WINGS, HAM, SAUSAGE, BACON, CHEESE,
        EGGS, ATKINS, BUFFALO_WINGS, BACON, BUTTER, CHEESE,
        MAYONNAISE, STEAK,
    ],
    // Reel 4
    &[
        HAM, CHEESE, ATKINS, SCALE, BUTTER, BACON,
        CHEESE, SAUSAGE, STEAK, EGGS, BACON, MAYONNAISE,
        SAUSAGE, CHEESE, BUTTER, HAM, MAYONNAISE, BACON,
        BUFFALO_WINGS, SAUSAGE, CHEESE, EGGS, BUTTER, BUFFALO_WINGS,
        BACON, MAYONNAISE, EGGS, HAM, SAUSAGE, STEAK,
        MAYONNAISE, BACON,
    ],
    // Reel 5
    &[
        BACON, SCALE, STEAK, HAM, CHEESE, SAUSAGE,
        BUTTER, BACON, BUFFALO_WINGS, CHEESE, SAUSAGE, HAM,
        BUTTER, STEAK, MAYONNAISE, EGGS, SAUSAGE, HAM,
        ATKINS, BUTTER, BUFFALO_WINGS, MAYONNAISE, EGGS, HAM,
        BACON, BUTTER, STEAK, MAYONNAISE, SAUSAGE, EGGS,
        CHEESE, BUFFALO_WINGS,
    ],
];
