//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
///
/// Every failure is raised at the point of detection; no operation falls
/// back to a sentinel value or a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// A symbol was looked up that is not a member of the alphabet.
    #[error("symbol {symbol:?} is not in the alphabet")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: char,
    },
    /// An index was outside `[0, size)` for the alphabet.
    #[error("index {index} is out of range for alphabet of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: i32,
        /// The alphabet size.
        size: usize,
    },
    /// A cycle string violated the cycle-notation grammar.
    #[error("malformed cycle notation: {reason}")]
    MalformedCycle {
        /// What was wrong with the notation.
        reason: String,
    },
    /// A symbol appeared more than once where each may appear at most once.
    #[error("symbol {symbol:?} appears more than once")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },
    /// An alphabet was constructed with no symbols at all.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// A rotor name had no match in the machine's catalog.
    #[error("no rotor named {name:?} in the catalog")]
    UnknownRotorName {
        /// The unmatched name.
        name: String,
    },
    /// A setting string did not have exactly one symbol per settable slot.
    #[error("setting string has {actual} symbols, expected {expected}")]
    WrongSettingLength {
        /// Number of symbols required (`num_rotors - 1`).
        expected: usize,
        /// Number of symbols supplied.
        actual: usize,
    },
    /// The configuration text ended before the alphabet and counts lines.
    #[error("configuration file truncated")]
    ConfigTruncated,
    /// The rotor/pawl counts line was unparsable or inconsistent.
    #[error("invalid rotor counts: {rotors} rotors, {pawls} pawls")]
    BadRotorCounts {
        /// Declared number of rotor slots.
        rotors: usize,
        /// Declared number of pawls.
        pawls: usize,
    },
    /// A rotor description line could not be parsed.
    #[error("bad rotor description: {line:?}")]
    BadRotorDescription {
        /// The offending line.
        line: String,
    },
    /// A setting line was missing tokens or carried a malformed plugboard.
    #[error("bad setting line: {reason}")]
    BadSetupLine {
        /// What was wrong with the line.
        reason: String,
    },
    /// A message line arrived before any setting line configured the machine.
    #[error("message line encountered before any setting line")]
    MissingSetup,
}
