//! Regression tests for the cipher core against frozen reference vectors.
//!
//! Every expected value here is a frozen snapshot of the reference
//! machine's behavior: the 18-step odometer of the stepping mechanism,
//! naval-wiring conversion vectors, and a lower-case custom machine.
//! Any change in these outputs indicates a cipher regression.
//!
//! Coverage:
//! - `Machine::advance_rotors` (double stepping, period of the rotor bank)
//! - `Machine::convert_index` / `convert` (full signal path, plugboard)
//! - reciprocity and statefulness of the cipher
//! - `Machine::insert_rotors` / `set_rotors` reconfiguration

use std::sync::Arc;

use enigma::{Alphabet, Machine, Permutation, Rotor};

/// Naval rotor wirings, as issued with the historical machine.
const WIRING_I: &str = "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)";
const WIRING_III: &str = "(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)";
const WIRING_IV: &str = "(AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)";
const WIRING_BETA: &str = "(ALBEVFCYODJWUGNMQTZSKPR) (HIX)";
const WIRING_B: &str = "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";

// ═══════════════════════════════════════════════════════════════════════
// Stepping — the 18-step odometer oracle
// ═══════════════════════════════════════════════════════════════════════

/// Positions after each of the first 19 advances, frozen. The bank is a
/// fixed rotor ahead of three moving rotors over ABC, notches at C.
const ODOMETER: [&str; 19] = [
    "AAAB", "AAAC", "AABA", "AABB", "AABC", "AACA", "ABAB", "ABAC", "ABBA",
    "ABBB", "ABBC", "ABCA", "ACAB", "ACAC", "ACBA", "ACBB", "ACBC", "ACCA",
    "AAAB",
];

/// Builds the odometer rig: catalog over ABC, machine over the default
/// alphabet, four of five slots filled.
fn odometer_machine() -> Machine {
    let abc = Arc::new(Alphabet::new("ABC").unwrap());
    let catalog = vec![
        Rotor::moving("I", Permutation::new("(ABC)", Arc::clone(&abc)).unwrap(), "C"),
        Rotor::moving("IV", Permutation::new("(ABC)", Arc::clone(&abc)).unwrap(), "C"),
        Rotor::moving("III", Permutation::new("(ABC)", Arc::clone(&abc)).unwrap(), "C"),
        Rotor::fixed("Beta", Permutation::new("(ABC)", Arc::clone(&abc)).unwrap()),
    ];
    let mut machine = Machine::new(Arc::new(Alphabet::default()), 5, 3, catalog);
    machine.insert_rotors(&["Beta", "III", "IV", "I"]).unwrap();
    machine
}

/// The frozen position sequence, including the double step at ABCA → ACAB
/// and the refusal of the leftmost moving rotor to self-step at ACAB.
#[test]
fn odometer_18_step_sequence() {
    let mut machine = odometer_machine();
    for (i, &expected) in ODOMETER.iter().enumerate() {
        machine.advance_rotors();
        assert_eq!(
            machine.rotor_positions(),
            expected,
            "positions mismatch after advance {}",
            i + 1
        );
    }
}

/// One full cycle of the bank is 18 steps; the sequence then repeats.
#[test]
fn odometer_period_is_18() {
    let mut machine = odometer_machine();
    for _ in 0..19 {
        machine.advance_rotors();
    }
    for (i, &expected) in ODOMETER.iter().enumerate().skip(1) {
        machine.advance_rotors();
        assert_eq!(
            machine.rotor_positions(),
            expected,
            "second cycle diverged at advance {}",
            i + 1
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Naval machine — frozen conversion vectors
// ═══════════════════════════════════════════════════════════════════════

/// Catalog of the five naval rotors used by the frozen vectors.
fn navy_catalog(alphabet: &Arc<Alphabet>) -> Vec<Rotor> {
    vec![
        Rotor::reflector("B", Permutation::new(WIRING_B, Arc::clone(alphabet)).unwrap()),
        Rotor::fixed(
            "Beta",
            Permutation::new(WIRING_BETA, Arc::clone(alphabet)).unwrap(),
        ),
        Rotor::moving(
            "III",
            Permutation::new(WIRING_III, Arc::clone(alphabet)).unwrap(),
            "V",
        ),
        Rotor::moving(
            "IV",
            Permutation::new(WIRING_IV, Arc::clone(alphabet)).unwrap(),
            "J",
        ),
        Rotor::moving(
            "I",
            Permutation::new(WIRING_I, Arc::clone(alphabet)).unwrap(),
            "Q",
        ),
    ]
}

/// B / Beta / III / IV / I at AXLE, no plugboard yet.
fn navy_machine() -> Machine {
    let alphabet = Arc::new(Alphabet::default());
    let catalog = navy_catalog(&alphabet);
    let mut machine = Machine::new(alphabet, 5, 3, catalog);
    machine
        .insert_rotors(&["B", "Beta", "III", "IV", "I"])
        .unwrap();
    machine.set_rotors("AXLE").unwrap();
    machine
}

/// Frozen single-index conversion: Y enters, Z leaves.
#[test]
fn navy_single_index_conversion() {
    let mut machine = navy_machine();
    let plugboard = Permutation::new("(YF) (HZ)", machine.shared_alphabet()).unwrap();
    machine.set_plugboard(plugboard);
    assert_eq!(machine.convert_index(24), 25);
}

/// Frozen message vector with the full plugboard from the reference trip.
#[test]
fn navy_message_frozen_vector() {
    let mut machine = navy_machine();
    let plugboard =
        Permutation::new("(HQ) (EX) (IP) (TR) (BY)", machine.shared_alphabet()).unwrap();
    machine.set_plugboard(plugboard);
    assert_eq!(
        machine.convert("FROMHISSHOULDERHIAWATHA").unwrap(),
        "QVPQSOKOILPUBKJZPISFXDW"
    );
}

/// A fresh machine at the same settings deciphers the frozen vector.
#[test]
fn navy_cipher_is_reciprocal() {
    let mut machine = navy_machine();
    let plugboard =
        Permutation::new("(HQ) (EX) (IP) (TR) (BY)", machine.shared_alphabet()).unwrap();
    machine.set_plugboard(plugboard);
    assert_eq!(
        machine.convert("QVPQSOKOILPUBKJZPISFXDW").unwrap(),
        "FROMHISSHOULDERHIAWATHA"
    );
}

/// Rotor motion makes the mapping position dependent.
#[test]
fn navy_conversion_is_stateful() {
    let mut machine = navy_machine();
    let first = machine.convert("AAAAA").unwrap();
    let second = machine.convert("AAAAA").unwrap();
    assert_ne!(first, second, "identical inputs must encipher differently");
}

/// Remounting and resetting restores the exact initial state.
#[test]
fn navy_remount_restores_state() {
    let mut machine = navy_machine();
    let first = machine.convert("HIAWATHA").unwrap();
    machine
        .insert_rotors(&["B", "Beta", "III", "IV", "I"])
        .unwrap();
    machine.set_rotors("AXLE").unwrap();
    assert_eq!(machine.convert("HIAWATHA").unwrap(), first);
}

/// Settings survive into `rotor_positions` after stepping.
#[test]
fn navy_positions_after_one_keystroke() {
    let mut machine = navy_machine();
    assert_eq!(machine.rotor_positions(), "AAXLE");
    machine.convert_symbol('A').unwrap();
    assert_eq!(machine.rotor_positions(), "AAXLF");
}

// ═══════════════════════════════════════════════════════════════════════
// Lower-case custom machine — frozen vector
// ═══════════════════════════════════════════════════════════════════════

/// A four-slot machine over a–z whose leftmost rotor is a fixed involution
/// standing in for a reflector. Frozen from the reference implementation.
#[test]
fn lowercase_machine_frozen_vector() {
    let alphabet = Arc::new(Alphabet::new("abcdefghijklmnopqrstuvwxyz").unwrap());
    let catalog = vec![
        Rotor::moving(
            "I",
            Permutation::new("(wordle) (is) (fun)", Arc::clone(&alphabet)).unwrap(),
            "a",
        ),
        Rotor::moving(
            "II",
            Permutation::new("(tears) (boing) (lucky)", Arc::clone(&alphabet)).unwrap(),
            "b",
        ),
        Rotor::moving(
            "III",
            Permutation::new("(quack) (froze) (twins) (glyph)", Arc::clone(&alphabet)).unwrap(),
            "m",
        ),
        Rotor::fixed(
            "Beta",
            Permutation::new(
                "(az) (by) (cx) (dw) (ev) (fu) (gt) (hs) (ir) (jq) (kp) (lo) (mn)",
                Arc::clone(&alphabet),
            )
            .unwrap(),
        ),
    ];
    let mut machine = Machine::new(Arc::clone(&alphabet), 4, 3, catalog);
    machine.insert_rotors(&["Beta", "III", "II", "I"]).unwrap();
    machine.set_rotors("maa").unwrap();
    let plugboard = Permutation::new("(az) (mn)", Arc::clone(&alphabet)).unwrap();
    machine.set_plugboard(plugboard);
    assert_eq!(machine.convert("aldie").unwrap(), "wgqxv");
}
