//! # Signup CLI
//!
//! Wires configuration, logging, the event bus and the manual-activation
//! backend together and drives a registration session from the command line.

pub mod args;
pub mod handlers;
