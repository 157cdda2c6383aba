//! Machine: the assembled cipher.
//!
//! Owns a catalog of rotors, an ordered slot assignment into that catalog,
//! and the plugboard. Each keystroke first steps the moving rotors (with the
//! double-stepping anomaly of the mechanical original), then routes one
//! signal through the stack:
//!
//! ```text
//! keystroke ── plugboard ── slot n-1 ── … ── slot 1 ── slot 0 (reflector)
//!                                                            │
//! output    ── plugboard ── slot n-1 ── … ── slot 1  ◄───────┘
//! ```
//!
//! Slot 0 is the leftmost rotor (the reflector). The forward pass runs right
//! to left and includes the reflector; the backward pass runs back out
//! through every slot except slot 0.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// Snapshot of one keystroke, handed to an installed [`Tracer`].
///
/// All values are symbols of the machine's alphabet, captured after the
/// rotors stepped for this keystroke.
#[derive(Debug, Clone)]
pub struct StepTrace {
    /// Setting symbol of every slot, leftmost first.
    pub positions: String,
    /// The symbol fed in.
    pub input: char,
    /// After the entry pass through the plugboard.
    pub plugboard_in: char,
    /// After each slot on the way in, rightmost slot first; the final
    /// entry is the reflector's output.
    pub forward: Vec<char>,
    /// After each slot on the way back out, left to right.
    pub backward: Vec<char>,
    /// After the exit pass through the plugboard.
    pub output: char,
}

/// Per-keystroke observer, invoked once per converted symbol.
pub type Tracer = Box<dyn FnMut(&StepTrace) + Send>;

/// A rotor cipher machine: catalog, slots, plugboard and stepping state.
///
/// The machine owns every available rotor in a catalog and addresses the
/// mounted ones through slot indices into it, so one catalog serves any
/// slot arrangement without shared-ownership juggling. Configuration is a
/// caller contract established by the loader: `num_rotors >= 2`, fewer
/// pawls than rotors, the reflector named first, and every mounted rotor
/// wired over the machine's alphabet. Within that contract the machine
/// detects and reports every symbol-level misuse.
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    catalog: Vec<Rotor>,
    slots: Vec<usize>,
    plugboard: Permutation,
    tracer: Option<Tracer>,
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("alphabet", &self.alphabet)
            .field("num_rotors", &self.num_rotors)
            .field("num_pawls", &self.num_pawls)
            .field("catalog", &self.catalog)
            .field("slots", &self.slots)
            .field("plugboard", &self.plugboard)
            .finish_non_exhaustive()
    }
}

impl Machine {
    /// Creates a machine with an empty slot assignment.
    ///
    /// # Parameters
    /// - `alphabet`: The machine's alphabet; mounted rotors must share it.
    /// - `num_rotors`: Number of slots a setting line must fill.
    /// - `num_pawls`: Number of stepping pawls (moving rotors allowed).
    /// - `catalog`: All rotors available to [`insert_rotors`](Self::insert_rotors).
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        catalog: Vec<Rotor>,
    ) -> Self {
        let plugboard = Permutation::identity(Arc::clone(&alphabet));
        Machine {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
            slots: Vec::new(),
            plugboard,
            tracer: None,
        }
    }

    /// Returns the number of rotor slots.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the machine's alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns a shared handle to the machine's alphabet, for building
    /// further permutations against it (plugboards in particular).
    pub fn shared_alphabet(&self) -> Arc<Alphabet> {
        Arc::clone(&self.alphabet)
    }

    /// Returns the rotor mounted in slot `k` (0 is the leftmost).
    ///
    /// # Panics
    /// Panics if slot `k` has not been filled by
    /// [`insert_rotors`](Self::insert_rotors).
    pub fn rotor(&self, k: usize) -> &Rotor {
        &self.catalog[self.slots[k]]
    }

    /// Returns the current plugboard permutation.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Renders the setting symbol of every mounted rotor, leftmost first.
    pub fn rotor_positions(&self) -> String {
        self.slots
            .iter()
            .map(|&idx| {
                let rotor = &self.catalog[idx];
                rotor.alphabet().symbols()[rotor.setting() as usize]
            })
            .collect()
    }

    /// Mounts the named catalog rotors into the slots, left to right.
    ///
    /// Every placed rotor's setting is reset to 0, whatever it was before.
    /// Callers supply exactly [`num_rotors`](Self::num_rotors) names with
    /// the reflector first; that arrangement is not re-validated here.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorName`] if any name has no catalog
    /// match. No slot is changed in that case.
    pub fn insert_rotors(&mut self, names: &[&str]) -> Result<(), EnigmaError> {
        let mut slots = Vec::with_capacity(names.len());
        for &name in names {
            let idx = self
                .catalog
                .iter()
                .position(|rotor| rotor.name() == name)
                .ok_or_else(|| EnigmaError::UnknownRotorName {
                    name: name.to_string(),
                })?;
            slots.push(idx);
        }
        for &idx in &slots {
            self.catalog[idx].set(0);
        }
        self.slots = slots;
        Ok(())
    }

    /// Sets the positions of slots `1..num_rotors` from a symbol string.
    ///
    /// The leftmost settable slot takes the first symbol. Slot 0 (the
    /// reflector) has no setting to speak of and is skipped.
    ///
    /// # Errors
    /// Returns [`EnigmaError::WrongSettingLength`] unless `setting` has
    /// exactly `num_rotors - 1` symbols, and [`EnigmaError::UnknownSymbol`]
    /// if any symbol is outside the alphabet. No position changes unless
    /// the whole string validates.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let expected = self.num_rotors.saturating_sub(1);
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != expected {
            return Err(EnigmaError::WrongSettingLength {
                expected,
                actual: symbols.len(),
            });
        }
        let mut positions = Vec::with_capacity(symbols.len());
        for &sym in &symbols {
            positions.push(self.alphabet.to_index(sym)?);
        }
        for (slot, posn) in (1..self.slots.len()).zip(positions) {
            let idx = self.slots[slot];
            self.catalog[idx].set(posn);
        }
        Ok(())
    }

    /// Replaces the plugboard permutation.
    ///
    /// The machine applies the forward map on both passes, so the plugboard
    /// should be an involution (pair swaps only) for the cipher to remain
    /// reciprocal. Identity until first set.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Installs or removes the per-keystroke trace callback.
    ///
    /// With no tracer installed the signal path assembles no trace at all.
    pub fn set_tracer(&mut self, tracer: Option<Tracer>) {
        self.tracer = tracer;
    }

    /// Steps the moving rotors as the keystroke's first act.
    ///
    /// All decisions are taken from one snapshot of the pre-step state and
    /// then applied together:
    /// - the rightmost rotating slot always advances;
    /// - a rotating slot advances when the slot to its right sat at a notch
    ///   (the pawl falls into that notch and pushes this rotor too);
    /// - a rotating slot sitting at its own notch advances when the slot to
    ///   its left also rotates; its notch sits under the left neighbour's
    ///   pawl, which drags both rotors forward. This is the double step: it
    ///   cannot occur where the left neighbour has no pawl, so the leftmost
    ///   moving rotor never steps on its own notch.
    pub fn advance_rotors(&mut self) {
        let n = self.slots.len();
        let rotates: Vec<bool> = (0..n).map(|k| self.rotor(k).rotates()).collect();
        let at_notch: Vec<bool> = (0..n).map(|k| self.rotor(k).at_notch()).collect();
        let rightmost = rotates.iter().rposition(|&moves| moves);

        let mut advancing = vec![false; n];
        for k in 0..n {
            if !rotates[k] {
                continue;
            }
            let driven = k + 1 < n && at_notch[k + 1];
            let self_step = at_notch[k] && k > 0 && rotates[k - 1];
            advancing[k] = Some(k) == rightmost || driven || self_step;
        }

        for (k, &advances) in advancing.iter().enumerate() {
            if advances {
                let idx = self.slots[k];
                self.catalog[idx].advance();
            }
        }
    }

    /// Converts one alphabet index: step, plugboard, through the stack to
    /// the reflector, back out, plugboard again.
    ///
    /// Total over all of `i32`; the index is wrapped into range. Stepping
    /// happens first, so two conversions from the same state give two
    /// different answers.
    pub fn convert_index(&mut self, c: i32) -> i32 {
        self.advance_rotors();

        let tracing = self.tracer.is_some();
        let mut forward_stages = Vec::new();
        let mut backward_stages = Vec::new();

        let entry = self.plugboard.permute_index(c);
        let mut signal = entry;
        for slot in (0..self.slots.len()).rev() {
            signal = self.rotor(slot).convert_forward(signal);
            if tracing {
                forward_stages.push(self.symbol_at(signal));
            }
        }
        for slot in 1..self.slots.len() {
            signal = self.rotor(slot).convert_backward(signal);
            if tracing {
                backward_stages.push(self.symbol_at(signal));
            }
        }
        let output = self.plugboard.permute_index(signal);

        if tracing {
            let trace = StepTrace {
                positions: self.rotor_positions(),
                input: self.symbol_at(self.plugboard.wrap(c)),
                plugboard_in: self.symbol_at(entry),
                forward: forward_stages,
                backward: backward_stages,
                output: self.symbol_at(output),
            };
            if let Some(tracer) = self.tracer.as_mut() {
                tracer(&trace);
            }
        }

        output
    }

    /// Converts one symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `sym` is not in the
    /// alphabet. The rotors do not step on a failed keystroke.
    pub fn convert_symbol(&mut self, sym: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_index(sym)?;
        let out = self.convert_index(idx);
        self.alphabet.to_symbol(out)
    }

    /// Converts a whole message, symbol by symbol, with cumulative stepping.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] at the first symbol outside
    /// the alphabet; symbols before it have already stepped the machine.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Machine, Permutation, Rotor};
    ///
    /// let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let catalog = vec![
    ///     Rotor::reflector("B", Permutation::new("(AB) (CD)", Arc::clone(&alphabet)).unwrap()),
    ///     Rotor::moving("I", Permutation::new("(ABCD)", Arc::clone(&alphabet)).unwrap(), "D"),
    /// ];
    /// let mut machine = Machine::new(alphabet, 2, 1, catalog);
    /// machine.insert_rotors(&["B", "I"]).unwrap();
    /// machine.set_rotors("A").unwrap();
    ///
    /// let ciphertext = machine.convert("BAD").unwrap();
    /// assert_eq!(ciphertext, "CDA");
    ///
    /// // Remounting resets the settings; the cipher is reciprocal.
    /// machine.insert_rotors(&["B", "I"]).unwrap();
    /// machine.set_rotors("A").unwrap();
    /// assert_eq!(machine.convert("CDA").unwrap(), "BAD");
    /// ```
    pub fn convert(&mut self, msg: &str) -> Result<String, EnigmaError> {
        let mut out = String::with_capacity(msg.len());
        for sym in msg.chars() {
            out.push(self.convert_symbol(sym)?);
        }
        Ok(out)
    }

    /// Symbol at a wrapped index of the machine's alphabet.
    fn symbol_at(&self, index: i32) -> char {
        self.alphabet.symbols()[index as usize]
    }
}
