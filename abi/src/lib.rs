//! JX runtime ABI types
//!
//! This crate holds the definitions shared between the runtime library,
//! the command processor and hosted programs:
//! - Error codes and the `RuntimeResult` alias
//! - Console device primitives and control bytes
//! - The 16-bit memory map and heap layout
//! - The BDOS function table
//!
//! Nothing here touches hardware; the crate is pure data and traits.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod bdos;
pub mod console;
pub mod error;
pub mod layout;

pub use bdos::*;
pub use console::*;
pub use error::*;
pub use layout::*;
