// src/prices/mod.rs
//! Price file loader.
//!
//! Reads `precios.txt` line by line, keeps the rows whose product is one of
//! the two tracked fuels and whose first column is `MAX`/`MIN`, and reduces
//! them to four extremal entries ([`PriceTable`]). Malformed or unrelated
//! lines are skipped and never abort a load.
//!
//! ```text
//! precios.txt → record::PriceRecord::parse → Products::classify
//!             → IndexKind::parse → PriceTable slot (seed / strictly-better update)
//! ```
//!
//! Every decision can be traced through a [`trace::TraceSink`]; the sink
//! never influences the result.

pub mod category;
pub mod record;
pub mod table;
pub mod trace;

pub use category::{FuelFamily, IndexKind, PriceCategory, Products};
pub use record::PriceRecord;
pub use table::{ExtremumEntry, LineOutcome, LoadSummary, PriceTable, SkipReason};
pub use trace::{FileTrace, NullTrace, TraceSink, VecTrace};
