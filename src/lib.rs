//! Rotor cipher machine simulator.
//!
//! Simulates the class of rotor machines built around a fixed reflector,
//! interchangeable wired rotors and a plugboard, over any caller-supplied
//! alphabet. The stepping mechanism reproduces the mechanical pawl
//! behavior, including the double step of a rotor sitting at its own
//! notch, so the cipher is reciprocal: the same settings that encrypt a
//! message decrypt it.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbol ↔ index bijection)
//!     ↕ shared by every component
//! Permutation  (cycle-notation wiring — total forward and inverse maps)
//!     ↕ one per rotor, plus the plugboard
//! Rotor        (a permutation behind a rotatable setting, with notches)
//!     ↕ mounted into slots, reflector leftmost
//! Machine      (orchestrator — stepping, plugboard, full signal path)
//! ```
//!
//! On top of the core sit a configuration-file loader ([`MachineConfig`])
//! and a script driver ([`Session`]) for the classic star-prefixed setting
//! lines and five-symbol output blocks.
//!
//! # Examples
//!
//! Assemble a toy machine by hand and encipher with it:
//!
//! ```
//! use std::sync::Arc;
//! use enigma::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
//! let catalog = vec![
//!     Rotor::reflector("B", Permutation::new("(AB) (CD)", Arc::clone(&alphabet)).unwrap()),
//!     Rotor::moving("I", Permutation::new("(ABCD)", Arc::clone(&alphabet)).unwrap(), "D"),
//! ];
//!
//! let mut machine = Machine::new(alphabet, 2, 1, catalog);
//! machine.insert_rotors(&["B", "I"]).unwrap();
//! machine.set_rotors("A").unwrap();
//! assert_eq!(machine.convert("BAD").unwrap(), "CDA");
//!
//! // The cipher is reciprocal: reset and feed the cipher text back in.
//! machine.insert_rotors(&["B", "I"]).unwrap();
//! machine.set_rotors("A").unwrap();
//! assert_eq!(machine.convert("CDA").unwrap(), "BAD");
//! ```
//!
//! Drive the same machine from a configuration text and an input script:
//!
//! ```
//! use enigma::{MachineConfig, Session};
//!
//! let config = MachineConfig::parse("ABCD\n2 1\nB R (AB) (CD)\nI MD (ABCD)\n").unwrap();
//! let mut session = Session::new(config.build().unwrap());
//!
//! let output = session.process("* B I A\nBAD BAD BAD\n").unwrap();
//! assert_eq!(output, "CDACD ACDA\n");
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
mod config;
mod machine;
mod permutation;
mod rotor;
mod session;

pub use alphabet::Alphabet;
pub use config::{MachineConfig, RotorDescriptor};
pub use error::EnigmaError;
pub use machine::{Machine, StepTrace, Tracer};
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use session::Session;
