//! AT command protocol for the Serigraph display terminal
//!
//! A host drives the terminal over a serial line, one command at a time:
//!
//! ```text
//! AT+<2-char-code>[=<p1>[,<p2>...,<p6>]];
//! ```
//!
//! - the `AT+` start marker must arrive byte-exact,
//! - `\0` and `\n` are transparent once it has,
//! - `;` terminates the command.
//!
//! The crate is transport-agnostic: bytes in, assembled commands and
//! argument lists out. Who acts on a command is decided elsewhere.

#![no_std]
#![deny(unsafe_code)]

pub mod args;
pub mod assembler;
pub mod registry;

pub use args::{tokenize, ArgError, Args, MAX_ARGS};
pub use assembler::{AssembleError, Assembler, Phase, MAX_COMMAND_LEN, TERMINATOR};
pub use registry::{lookup, Command, COMMANDS, MNEMONIC_LEN};

#[cfg(test)]
#[macro_use]
extern crate std;
