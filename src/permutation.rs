//! Permutation: a bijection over alphabet indices, written in cycle notation.
//!
//! A cycle string like `(AELTPHQXRU) (BKNW) (CMOY)` lists disjoint cycles:
//! within `(s0 s1 … sk)` each symbol maps forward to the next and the last
//! wraps to the first. Symbols the string never mentions map to themselves.
//! Rotor wirings, reflectors and the plugboard are all values of this type.
//!
//! Construction parses the whole string, validates it, and freezes two total
//! lookup tables (forward and inverse). After that every conversion is a
//! table read; the permutation itself never mutates.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// Bijection over the indices of one [`Alphabet`].
///
/// Index arguments may be any `i32`; they are reduced into `[0, size)` with
/// [`wrap`](Self::wrap) first, so callers can feed raw offset arithmetic
/// (including negative values) straight in.
#[derive(Debug, Clone, PartialEq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    cycles: String,
    forward: Vec<i32>,
    inverse: Vec<i32>,
}

impl Permutation {
    /// Creates a permutation of `alphabet` from a cycle string.
    ///
    /// Whitespace is insignificant everywhere; an empty string denotes the
    /// identity permutation.
    ///
    /// # Parameters
    /// - `cycles`: Zero or more parenthesized cycles, e.g. `"(ABC) (D)"`.
    /// - `alphabet`: The alphabet the permutation is defined over.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MalformedCycle`] when the grammar is violated
    /// (unbalanced or nested parentheses, an empty `()`, a symbol outside
    /// any cycle, or a symbol that is not in `alphabet`) and
    /// [`EnigmaError::DuplicateSymbol`] when a symbol occurs in two cycle
    /// positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::new("(ABCD)", alphabet).unwrap();
    /// assert_eq!(perm.permute_symbol('A').unwrap(), 'B');
    /// assert_eq!(perm.invert_symbol('A').unwrap(), 'D');
    /// assert!(perm.is_derangement());
    /// ```
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alphabet = Arc::new(Alphabet::new("ABC").unwrap());
    /// assert!(Permutation::new("(AB", alphabet).is_err());
    /// ```
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let chains = Self::parse_chains(cycles, &alphabet)?;

        let size = alphabet.size();
        let mut forward: Vec<i32> = (0..size as i32).collect();
        let mut seen = vec![false; size];
        for chain in &chains {
            for &idx in chain {
                if seen[idx as usize] {
                    return Err(EnigmaError::DuplicateSymbol {
                        symbol: alphabet.symbols()[idx as usize],
                    });
                }
                seen[idx as usize] = true;
            }
            for (k, &idx) in chain.iter().enumerate() {
                forward[idx as usize] = chain[(k + 1) % chain.len()];
            }
        }

        let mut inverse = vec![0i32; size];
        for (i, &image) in forward.iter().enumerate() {
            inverse[image as usize] = i as i32;
        }

        Ok(Permutation {
            alphabet,
            cycles: cycles.to_string(),
            forward,
            inverse,
        })
    }

    /// Creates the identity permutation of `alphabet`.
    ///
    /// Equivalent to `Permutation::new("", alphabet)` but infallible; used
    /// for the plugboard of a machine before any plugboard is set.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Permutation {
            alphabet,
            cycles: String::new(),
            forward: (0..size as i32).collect(),
            inverse: (0..size as i32).collect(),
        }
    }

    /// Splits a cycle string into chains of alphabet indices.
    fn parse_chains(cycles: &str, alphabet: &Alphabet) -> Result<Vec<Vec<i32>>, EnigmaError> {
        let mut chains = Vec::new();
        let mut current: Option<Vec<i32>> = None;
        for ch in cycles.chars() {
            match ch {
                '(' => {
                    if current.is_some() {
                        return Err(EnigmaError::MalformedCycle {
                            reason: "'(' inside a cycle".to_string(),
                        });
                    }
                    current = Some(Vec::new());
                }
                ')' => match current.take() {
                    Some(chain) if chain.is_empty() => {
                        return Err(EnigmaError::MalformedCycle {
                            reason: "empty cycle '()'".to_string(),
                        });
                    }
                    Some(chain) => chains.push(chain),
                    None => {
                        return Err(EnigmaError::MalformedCycle {
                            reason: "')' without matching '('".to_string(),
                        });
                    }
                },
                ch if ch.is_whitespace() => {}
                ch => match current.as_mut() {
                    Some(chain) => match alphabet.to_index(ch) {
                        Ok(idx) => chain.push(idx),
                        Err(_) => {
                            return Err(EnigmaError::MalformedCycle {
                                reason: format!("symbol {:?} is not in the alphabet", ch),
                            });
                        }
                    },
                    None => {
                        return Err(EnigmaError::MalformedCycle {
                            reason: format!("symbol {:?} outside parentheses", ch),
                        });
                    }
                },
            }
        }
        if current.is_some() {
            return Err(EnigmaError::MalformedCycle {
                reason: "unclosed '('".to_string(),
            });
        }
        Ok(chains)
    }

    /// Returns the alphabet this permutation is defined over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the alphabet size (and therefore the permutation's domain size).
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Returns the cycle string the permutation was built from.
    pub fn cycles(&self) -> &str {
        &self.cycles
    }

    /// Reduces any integer into `[0, size)`, wrapping negatives upward.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
    /// let perm = Permutation::identity(alphabet);
    /// assert_eq!(perm.wrap(5), 1);
    /// assert_eq!(perm.wrap(-1), 3);
    /// ```
    pub fn wrap(&self, p: i32) -> i32 {
        (p as i64).rem_euclid(self.alphabet.size() as i64) as i32
    }

    /// Returns the image of index `p` under the permutation.
    ///
    /// `p` is wrapped first, so any `i32` is a valid argument.
    pub fn permute_index(&self, p: i32) -> i32 {
        self.forward[self.wrap(p) as usize]
    }

    /// Returns the preimage of index `c` under the permutation.
    ///
    /// `c` is wrapped first, so any `i32` is a valid argument.
    pub fn invert_index(&self, c: i32) -> i32 {
        self.inverse[self.wrap(c) as usize]
    }

    /// Returns the image of `sym` under the permutation.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `sym` is not in the alphabet.
    pub fn permute_symbol(&self, sym: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_index(sym)?;
        self.alphabet.to_symbol(self.permute_index(idx))
    }

    /// Returns the preimage of `sym` under the permutation.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `sym` is not in the alphabet.
    pub fn invert_symbol(&self, sym: char) -> Result<char, EnigmaError> {
        let idx = self.alphabet.to_index(sym)?;
        self.alphabet.to_symbol(self.invert_index(idx))
    }

    /// Reports whether the permutation moves every symbol (no fixed points).
    ///
    /// Reflector wirings must be derangements; the machine's signal path
    /// never produces the symbol that was fed in when this holds for the
    /// reflector.
    pub fn is_derangement(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(i, &image)| image != i as i32)
    }
}
