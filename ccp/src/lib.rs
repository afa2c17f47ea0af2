//! JX console command processor.
//!
//! Reads command lines from the console, runs the handful of built-ins and
//! hands everything else to the program loader.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod shell;


pub use commands::{BUILTINS, BuiltinEntry, Command, lookup};
pub use config::{CCP_PROMPT, CMD_MAX, CcpConfig, HeapProbe};
pub use shell::{Ccp, Exit, Flow};
