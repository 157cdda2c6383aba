//! Session driver: runs an input script against one machine.
//!
//! A script mixes two kinds of lines. A line whose first non-blank symbol
//! is `*` reconfigures the machine:
//!
//! ```text
//! * B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//!   └── rotor names ──┘  └─┘  └── plugboard cycles ──┘
//!                      setting
//! ```
//!
//! Every other line is a message: whitespace is stripped, the remainder is
//! enciphered symbol by symbol, and the result is regrouped into blocks of
//! five. Messages are rejected until a setting line has been applied, and
//! again after one fails, until the next one succeeds.

use tracing::debug;

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;

/// Script processor owning a configured [`Machine`].
pub struct Session {
    machine: Machine,
    configured: bool,
}

impl Session {
    /// Wraps a machine whose slots may still be empty; the first setting
    /// line fills them.
    pub fn new(machine: Machine) -> Self {
        Session {
            machine,
            configured: false,
        }
    }

    /// Returns the underlying machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Processes one script line.
    ///
    /// Returns `None` for a setting line and the formatted cipher text for
    /// a message line. A blank message line yields an empty string.
    ///
    /// # Errors
    /// [`EnigmaError::MissingSetup`] for a message line before the first
    /// setting line, [`EnigmaError::BadSetupLine`] for a malformed setting
    /// line, plus every reconfiguration and conversion error of the
    /// machine itself. A setting line that fails deconfigures the session:
    /// message lines keep returning [`EnigmaError::MissingSetup`] until a
    /// later setting line succeeds.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, EnigmaError> {
        if let Some(rest) = line.trim_start().strip_prefix('*') {
            self.configured = false;
            self.set_up(rest)?;
            self.configured = true;
            return Ok(None);
        }
        if !self.configured {
            return Err(EnigmaError::MissingSetup);
        }
        let compact: String = line.split_whitespace().collect();
        let converted = self.machine.convert(&compact)?;
        Ok(Some(format_blocks(&converted)))
    }

    /// Processes a whole script, one output line per message line.
    ///
    /// # Errors
    /// Stops at the first failing line with that line's error.
    pub fn process(&mut self, script: &str) -> Result<String, EnigmaError> {
        let mut out = String::new();
        for line in script.lines() {
            if let Some(output) = self.process_line(line)? {
                out.push_str(&output);
                out.push('\n');
            }
        }
        Ok(out)
    }

    /// Applies one setting line (everything after the `*`).
    fn set_up(&mut self, rest: &str) -> Result<(), EnigmaError> {
        let num_rotors = self.machine.num_rotors();
        let mut tokens = rest.split_whitespace();
        let names: Vec<&str> = tokens.by_ref().take(num_rotors).collect();
        if names.len() < num_rotors {
            return Err(EnigmaError::BadSetupLine {
                reason: format!("expected {num_rotors} rotor names"),
            });
        }
        let setting = tokens.next().ok_or_else(|| EnigmaError::BadSetupLine {
            reason: "missing initial setting".to_string(),
        })?;
        let extras: Vec<&str> = tokens.collect();
        if extras.first().is_some_and(|first| !first.starts_with('(')) {
            return Err(EnigmaError::BadSetupLine {
                reason: format!("unexpected token {:?} after the setting", extras[0]),
            });
        }

        // The plugboard must parse before the first machine mutation.
        let plugboard = if extras.is_empty() {
            Permutation::identity(self.machine.shared_alphabet())
        } else {
            Permutation::new(&extras.join(" "), self.machine.shared_alphabet())?
        };

        self.machine.insert_rotors(&names)?;
        self.machine.set_rotors(setting)?;
        self.machine.set_plugboard(plugboard);

        debug!(rotors = ?names, setting = %setting, "machine reconfigured");
        Ok(())
    }
}

/// Regroups cipher text into five-symbol blocks separated by spaces.
fn format_blocks(text: &str) -> String {
    let symbols: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(symbols.len() + symbols.len() / 5);
    for (i, chunk) in symbols.chunks(5).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.extend(chunk);
    }
    out
}
