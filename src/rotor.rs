//! Rotor: a permutation mounted in a rotatable frame.
//!
//! A rotor couples a wiring [`Permutation`] with a rotational `setting`.
//! The signal enters at a contact, is shifted by the setting into the
//! wiring's frame of reference, permuted, and shifted back out. Three kinds
//! share the one type: reflectors (leftmost, turn the signal around), fixed
//! rotors (settable but never step), and moving rotors (step under pawl
//! control and carry notches that drive their neighbours).

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// Role of a rotor within the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotorKind {
    /// Leftmost slot; sends the signal back through the stack.
    Reflector,
    /// Settable but never advances (e.g. the Beta and Gamma rotors).
    Fixed,
    /// Advances under pawl control; carries notches.
    Moving,
}

/// One rotor: a named wiring with a kind, a notch set and a setting.
///
/// The setting is always within `[0, size)`. New rotors start at 0.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    kind: RotorKind,
    permutation: Permutation,
    notches: String,
    setting: i32,
}

impl Rotor {
    /// Creates a reflector.
    ///
    /// # Parameters
    /// - `name`: Catalog name, e.g. `"B"`.
    /// - `permutation`: The wiring; reflectors are conventionally
    ///   derangements of pair swaps, but this is not re-validated here.
    pub fn reflector(name: &str, permutation: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            kind: RotorKind::Reflector,
            permutation,
            notches: String::new(),
            setting: 0,
        }
    }

    /// Creates a fixed (non-stepping) rotor.
    ///
    /// # Parameters
    /// - `name`: Catalog name, e.g. `"Beta"`.
    /// - `permutation`: The wiring.
    pub fn fixed(name: &str, permutation: Permutation) -> Self {
        Rotor {
            name: name.to_string(),
            kind: RotorKind::Fixed,
            permutation,
            notches: String::new(),
            setting: 0,
        }
    }

    /// Creates a moving rotor.
    ///
    /// # Parameters
    /// - `name`: Catalog name, e.g. `"I"`.
    /// - `permutation`: The wiring.
    /// - `notches`: Symbols at which this rotor drives its left neighbour.
    ///   Stored verbatim; a symbol outside the alphabet simply never
    ///   matches any setting.
    pub fn moving(name: &str, permutation: Permutation, notches: &str) -> Self {
        Rotor {
            name: name.to_string(),
            kind: RotorKind::Moving,
            permutation,
            notches: notches.to_string(),
            setting: 0,
        }
    }

    /// Returns the rotor's catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotor's kind.
    pub fn kind(&self) -> RotorKind {
        self.kind
    }

    /// Returns the alphabet the rotor's wiring is defined over.
    pub fn alphabet(&self) -> &Alphabet {
        self.permutation.alphabet()
    }

    /// Returns the wiring permutation.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the alphabet size.
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Reports whether this rotor can advance (kind is [`RotorKind::Moving`]).
    pub fn rotates(&self) -> bool {
        self.kind == RotorKind::Moving
    }

    /// Reports whether this rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        self.kind == RotorKind::Reflector
    }

    /// Returns the current rotational setting, in `[0, size)`.
    pub fn setting(&self) -> i32 {
        self.setting
    }

    /// Sets the rotational position to `wrap(posn)`.
    pub fn set(&mut self, posn: i32) {
        self.setting = self.permutation.wrap(posn);
    }

    /// Sets the rotational position to the index of `sym`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `sym` is not in the
    /// alphabet; the setting is left unchanged in that case.
    pub fn set_symbol(&mut self, sym: char) -> Result<(), EnigmaError> {
        self.setting = self.permutation.alphabet().to_index(sym)?;
        Ok(())
    }

    /// Returns the notch symbols (empty unless the rotor is moving).
    pub fn notches(&self) -> &str {
        &self.notches
    }

    /// Reports whether the rotor currently sits at one of its notches.
    ///
    /// Always false for reflectors and fixed rotors.
    pub fn at_notch(&self) -> bool {
        if !self.rotates() {
            return false;
        }
        let sym = self.permutation.alphabet().symbols()[self.setting as usize];
        self.notches.contains(sym)
    }

    /// Advances the setting by one position, wrapping at the alphabet size.
    ///
    /// No-op unless the rotor [`rotates`](Self::rotates).
    pub fn advance(&mut self) {
        if self.rotates() {
            self.setting = self.permutation.wrap(self.setting + 1);
        }
    }

    /// Converts a contact index on the way in (right to left).
    ///
    /// The entering position is shifted by the setting into the wiring's
    /// frame, permuted, and shifted back: all arithmetic wraps, so any
    /// `i32` is a valid argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation, Rotor};
    ///
    /// let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let wiring = Permutation::new("(AB) (CD)", alphabet).unwrap();
    /// let mut rotor = Rotor::moving("I", wiring, "D");
    ///
    /// assert_eq!(rotor.convert_forward(0), 1);
    /// rotor.advance();
    /// assert_eq!(rotor.convert_forward(0), 3);
    /// assert_eq!(rotor.convert_backward(3), 0);
    /// ```
    pub fn convert_forward(&self, p: i32) -> i32 {
        let entered = self.permutation.wrap(p) + self.setting;
        let exited = self.permutation.permute_index(entered);
        self.permutation.wrap(exited - self.setting)
    }

    /// Converts a contact index on the way back (left to right).
    ///
    /// Exact inverse of [`convert_forward`](Self::convert_forward) at the
    /// same setting.
    pub fn convert_backward(&self, e: i32) -> i32 {
        let entered = self.permutation.wrap(e) + self.setting;
        let exited = self.permutation.invert_index(entered);
        self.permutation.wrap(exited - self.setting)
    }
}
