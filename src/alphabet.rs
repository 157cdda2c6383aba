//! Alphabet: ordered symbol set with a symbol ↔ index bijection.
//!
//! Every component of the machine speaks in indices internally and in
//! symbols at the edges. The alphabet is the single source of truth for
//! that mapping: symbol `i` of the construction string sits at index `i`,
//! and both directions fail loudly instead of returning a sentinel.

use std::collections::HashMap;

use crate::error::EnigmaError;

/// Ordered set of distinct symbols, indexed `0..size`.
///
/// Immutable once constructed. Machines, rotors and permutations share one
/// alphabet by reference (`Arc<Alphabet>`), so equality of the mapping is
/// equality of the instance in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, i32>,
}

impl Alphabet {
    /// Creates an alphabet from the symbols of `chars`, in order.
    ///
    /// # Parameters
    /// - `chars`: The symbols, first symbol at index 0.
    ///
    /// # Errors
    /// Returns [`EnigmaError::DuplicateSymbol`] if a symbol appears twice
    /// and [`EnigmaError::EmptyAlphabet`] if `chars` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alphabet = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alphabet.size(), 4);
    /// ```
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// assert!(Alphabet::new("ABCA").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        let symbols: Vec<char> = chars.chars().collect();
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &sym) in symbols.iter().enumerate() {
            if index.insert(sym, i as i32).is_some() {
                return Err(EnigmaError::DuplicateSymbol { symbol: sym });
            }
        }
        Ok(Alphabet { symbols, index })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Reports whether `sym` is a member of the alphabet.
    pub fn contains(&self, sym: char) -> bool {
        self.index.contains_key(&sym)
    }

    /// Returns the index of `sym`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `sym` is not a member.
    /// There is no sentinel value for a miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alphabet = Alphabet::default();
    /// assert_eq!(alphabet.to_index('C').unwrap(), 2);
    /// assert!(alphabet.to_index('c').is_err());
    /// ```
    pub fn to_index(&self, sym: char) -> Result<i32, EnigmaError> {
        self.index
            .get(&sym)
            .copied()
            .ok_or(EnigmaError::UnknownSymbol { symbol: sym })
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] unless `0 <= index < size`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alphabet = Alphabet::default();
    /// assert_eq!(alphabet.to_symbol(25).unwrap(), 'Z');
    /// assert!(alphabet.to_symbol(26).is_err());
    /// assert!(alphabet.to_symbol(-1).is_err());
    /// ```
    pub fn to_symbol(&self, index: i32) -> Result<char, EnigmaError> {
        if index < 0 || index as usize >= self.symbols.len() {
            return Err(EnigmaError::IndexOutOfRange {
                index,
                size: self.symbols.len(),
            });
        }
        Ok(self.symbols[index as usize])
    }

    /// Returns the symbols in index order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    /// The upper-case letters `A` through `Z`.
    fn default() -> Self {
        let symbols: Vec<char> = ('A'..='Z').collect();
        let index = symbols
            .iter()
            .enumerate()
            .map(|(i, &sym)| (sym, i as i32))
            .collect();
        Alphabet { symbols, index }
    }
}
