//! Board-agnostic transport and dispatch for the Serigraph display terminal.
//!
//! Everything between the wire and the panel driver that does not depend on
//! specific hardware:
//!
//! - single-producer/single-consumer byte ring buffer
//! - serial port object (receive/transmit rings, debug reporting)
//! - panel abstraction trait
//! - panel profile registry
//! - action trait, slot bindings and the command dispatcher

#![no_std]
#![deny(unsafe_code)]

pub mod actions;
pub mod dispatch;
pub mod panel;
pub mod profile;
pub mod ring;
pub mod serial;

#[cfg(test)]
#[macro_use]
extern crate std;
