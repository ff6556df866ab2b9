// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;

pub mod csv;
pub mod digest;
pub mod prices;
pub mod present;
pub mod runner;
pub mod shell;

pub mod gui;

#[cfg(feature = "cli")]
pub mod cli;

pub use prices::{ExtremumEntry, FuelFamily, IndexKind, PriceCategory, PriceTable};
pub use present::Presenter;
