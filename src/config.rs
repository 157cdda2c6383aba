//! Configuration loader: the machine-description text format.
//!
//! A configuration names the alphabet, the slot and pawl counts, and the
//! full rotor catalog:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ        alphabet symbols
//!  5 3                              rotor slots, pawls
//!  I   MQ  (AELTPHQXRU) (BKNW)      name, type tag, wiring cycles
//!      (CMOY) (DFG) (IV) (JZ) (S)   '(' continues the previous rotor
//!  B   R   (AE) (BN) (CK) ...
//! ```
//!
//! The type tag is `R` for a reflector, `N` for a fixed rotor, or `M`
//! followed by the notch symbols for a moving rotor. Blank lines are
//! ignored. Parsing and construction are separate steps, so one parsed
//! description can build any number of independent machines.

use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorKind};

/// One catalog entry of a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorDescriptor {
    /// Rotor name, as used on setting lines.
    pub name: String,
    /// Reflector, fixed or moving.
    pub kind: RotorKind,
    /// Wiring in cycle notation, continuation lines already joined.
    pub cycles: String,
    /// Notch symbols; empty unless the rotor is moving.
    pub notches: String,
}

/// A parsed machine description, ready to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// The alphabet symbols, in order.
    pub alphabet: String,
    /// Number of rotor slots a setting line must fill.
    pub num_rotors: usize,
    /// Number of stepping pawls.
    pub num_pawls: usize,
    /// Every rotor available to the machine.
    pub rotors: Vec<RotorDescriptor>,
}

impl MachineConfig {
    /// Parses a configuration text.
    ///
    /// # Errors
    /// - [`EnigmaError::ConfigTruncated`] if the alphabet or counts line
    ///   is missing.
    /// - [`EnigmaError::BadRotorCounts`] if the counts line does not hold
    ///   two integers with `2 <= rotors` and `pawls < rotors`.
    /// - [`EnigmaError::BadRotorDescription`] for a rotor line without a
    ///   valid type tag, or a continuation line with no rotor before it.
    ///
    /// Wiring strings are kept verbatim here; they are validated against
    /// the alphabet by [`build`](Self::build).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse("ABCD\n2 1\nB R (AB) (CD)\nI MD (ABCD)\n").unwrap();
    /// assert_eq!(config.num_rotors, 2);
    /// assert_eq!(config.rotors[1].notches, "D");
    /// ```
    pub fn parse(text: &str) -> Result<MachineConfig, EnigmaError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let alphabet = lines
            .next()
            .and_then(|line| line.split_whitespace().next())
            .ok_or(EnigmaError::ConfigTruncated)?
            .to_string();
        let counts = lines.next().ok_or(EnigmaError::ConfigTruncated)?;
        let (num_rotors, num_pawls) = parse_counts(counts)?;

        let mut rotors: Vec<RotorDescriptor> = Vec::new();
        for line in lines {
            if line.starts_with('(') {
                let previous =
                    rotors
                        .last_mut()
                        .ok_or_else(|| EnigmaError::BadRotorDescription {
                            line: line.to_string(),
                        })?;
                previous.cycles.push(' ');
                previous.cycles.push_str(line);
            } else {
                rotors.push(parse_rotor_line(line)?);
            }
        }

        debug!(
            alphabet = %alphabet,
            num_rotors,
            num_pawls,
            catalog = rotors.len(),
            "configuration parsed"
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
        })
    }

    /// Builds a fresh machine from this description.
    ///
    /// The machine starts with empty slots; mount rotors with
    /// [`Machine::insert_rotors`].
    ///
    /// # Errors
    /// Surfaces the alphabet and wiring construction errors:
    /// [`EnigmaError::EmptyAlphabet`], [`EnigmaError::DuplicateSymbol`]
    /// and [`EnigmaError::MalformedCycle`].
    pub fn build(&self) -> Result<Machine, EnigmaError> {
        let alphabet = Arc::new(Alphabet::new(&self.alphabet)?);
        let mut catalog = Vec::with_capacity(self.rotors.len());
        for descriptor in &self.rotors {
            let permutation = Permutation::new(&descriptor.cycles, Arc::clone(&alphabet))?;
            let rotor = match descriptor.kind {
                RotorKind::Reflector => Rotor::reflector(&descriptor.name, permutation),
                RotorKind::Fixed => Rotor::fixed(&descriptor.name, permutation),
                RotorKind::Moving => {
                    Rotor::moving(&descriptor.name, permutation, &descriptor.notches)
                }
            };
            catalog.push(rotor);
        }
        debug!(catalog = catalog.len(), "machine built");
        Ok(Machine::new(
            alphabet,
            self.num_rotors,
            self.num_pawls,
            catalog,
        ))
    }
}

/// Reads `rotors pawls` from the counts line.
fn parse_counts(line: &str) -> Result<(usize, usize), EnigmaError> {
    let mut tokens = line.split_whitespace();
    let rotors: Option<usize> = tokens.next().and_then(|tok| tok.parse().ok());
    let pawls: Option<usize> = tokens.next().and_then(|tok| tok.parse().ok());
    let (Some(rotors), Some(pawls)) = (rotors, pawls) else {
        return Err(EnigmaError::BadRotorCounts { rotors: 0, pawls: 0 });
    };
    if rotors < 2 || pawls >= rotors {
        return Err(EnigmaError::BadRotorCounts { rotors, pawls });
    }
    Ok((rotors, pawls))
}

/// Reads `name tag cycles…` from one rotor line.
fn parse_rotor_line(line: &str) -> Result<RotorDescriptor, EnigmaError> {
    let bad = || EnigmaError::BadRotorDescription {
        line: line.to_string(),
    };
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or_else(bad)?;
    let tag = tokens.next().ok_or_else(bad)?;
    let mut tag_chars = tag.chars();
    let (kind, notches) = match tag_chars.next() {
        Some('R') if tag.len() == 1 => (RotorKind::Reflector, ""),
        Some('N') if tag.len() == 1 => (RotorKind::Fixed, ""),
        Some('M') => (RotorKind::Moving, tag_chars.as_str()),
        _ => return Err(bad()),
    };
    let cycles = tokens.collect::<Vec<_>>().join(" ");
    Ok(RotorDescriptor {
        name: name.to_string(),
        kind,
        cycles,
        notches: notches.to_string(),
    })
}
