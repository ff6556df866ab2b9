// src/prices/table.rs
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{
    category::{IndexKind, PriceCategory, Products},
    record::PriceRecord,
    trace::{NullTrace, TraceSink},
};
use crate::config::consts::{CAP_ADDRESS, CAP_COMPANY, CAP_LOCALITY, CAP_PRODUCT, MAX_LINE_BYTES};
use crate::core::text::{bounded, utf8_cut};
use crate::error::LoadError;

/// The record kept for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtremumEntry {
    pub product: String,
    pub address: String,
    pub locality: String,
    pub company: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl ExtremumEntry {
    fn from_record(rec: &PriceRecord) -> Self {
        let (latitude, longitude) = rec.coordinates();
        Self {
            product: bounded(rec.product, CAP_PRODUCT),
            address: bounded(rec.address.unwrap_or(""), CAP_ADDRESS),
            locality: bounded(rec.locality.unwrap_or(""), CAP_LOCALITY),
            company: bounded(rec.company.unwrap_or(""), CAP_COMPANY),
            price: rec.price_value(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> (f64, f64) { (self.latitude, self.longitude) }
}

/// Why a line did not reach the reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingFields,
    UnknownProduct,
    BadIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Skipped(SkipReason),
    /// First record for an empty slot.
    Seeded(PriceCategory),
    /// Strictly more extreme than the current entry.
    Updated(PriceCategory),
    /// Not more extreme; entry unchanged.
    Kept(PriceCategory),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub lines: usize,
    pub missing_fields: usize,
    pub unknown_product: usize,
    pub bad_index: usize,
    pub seeded: usize,
    pub updated: usize,
    pub kept: usize,
    /// Categories present after the scan (0..=4).
    pub found: usize,
}

impl LoadSummary {
    fn record(&mut self, outcome: LineOutcome) {
        match outcome {
            LineOutcome::Skipped(SkipReason::MissingFields) => self.missing_fields += 1,
            LineOutcome::Skipped(SkipReason::UnknownProduct) => self.unknown_product += 1,
            LineOutcome::Skipped(SkipReason::BadIndex) => self.bad_index += 1,
            LineOutcome::Seeded(_) => self.seeded += 1,
            LineOutcome::Updated(_) => self.updated += 1,
            LineOutcome::Kept(_) => self.kept += 1,
        }
    }

    /// Lines that landed in a category, whether or not they changed it.
    pub fn accepted(&self) -> usize { self.seeded + self.updated + self.kept }
}

/// Four extremal price slots, one per [`PriceCategory`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceTable {
    entries: [Option<ExtremumEntry>; PriceCategory::COUNT],
}

impl PriceTable {
    pub fn new() -> Self { Self::default() }

    /// Load `path` with the default product names and no trace.
    /// `true` iff at least one category was found.
    pub fn load(&mut self, path: &Path) -> bool {
        self.load_with_sink(path, &Products::default(), &mut NullTrace)
    }

    pub fn load_with_sink(&mut self, path: &Path, products: &Products, sink: &mut dyn TraceSink) -> bool {
        match self.load_with(path, products, sink) {
            Ok(sum) => {
                logf!("Prices: {} line(s), {} accepted, {} categor(ies) found",
                    sum.lines, sum.accepted(), sum.found);
                true
            }
            Err(e) => {
                loge!("Prices: {e}");
                false
            }
        }
    }

    /// Fallible form of [`PriceTable::load`]. The table is emptied first and
    /// replaced with the scan result, so a failed open leaves it empty.
    pub fn load_with(
        &mut self,
        path: &Path,
        products: &Products,
        sink: &mut dyn TraceSink,
    ) -> Result<LoadSummary, LoadError> {
        sink.append(&format!("Opening file: {}", path.display()));
        *self = Self::default();

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                sink.append(&format!("ERROR: cannot open file ({e})"));
                return Err(LoadError::Open { path: path.to_path_buf(), source: e });
            }
        };

        let (table, summary) = Self::from_reader(BufReader::new(file), products, sink);
        *self = table;

        if summary.found == 0 {
            return Err(LoadError::NothingFound(path.display().to_string()));
        }
        Ok(summary)
    }

    /// Scan any line source into a fresh table.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        products: &Products,
        sink: &mut dyn TraceSink,
    ) -> (Self, LoadSummary) {
        let mut table = Self::default();
        let mut summary = LoadSummary::default();
        let mut raw: Vec<u8> = Vec::new();

        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    sink.append(&format!("ERROR: read failed after line {} ({e})", summary.lines));
                    loge!("Prices: read failed after line {}: {e}", summary.lines);
                    break;
                }
            }
            summary.lines += 1;

            // Cut raw bytes: lossy decoding can triple the length of non-UTF-8 text
            raw.truncate(utf8_cut(&raw, MAX_LINE_BYTES));
            let text = String::from_utf8_lossy(&raw);
            let line: &str = &text;
            sink.append(&format!("Line {} raw: {}", summary.lines, line.trim_end_matches(['\r', '\n'])));

            let outcome = table.ingest_line(line, products, sink);
            summary.record(outcome);
        }

        summary.found = table.found();
        sink.append(&format!(
            "Summary: found={} (NaftaMax={}, NaftaMin={}, DieselMax={}, DieselMin={})",
            summary.found,
            table.is_present(PriceCategory::NaftaMax) as u8,
            table.is_present(PriceCategory::NaftaMin) as u8,
            table.is_present(PriceCategory::DieselMax) as u8,
            table.is_present(PriceCategory::DieselMin) as u8,
        ));

        (table, summary)
    }

    /// Classify one line and fold it into the table.
    pub fn ingest_line(&mut self, line: &str, products: &Products, sink: &mut dyn TraceSink) -> LineOutcome {
        let Some(rec) = PriceRecord::parse(line) else {
            sink.append("  -> line skipped (missing key fields)");
            return LineOutcome::Skipped(SkipReason::MissingFields);
        };

        sink.append(&format!(
            "  -> product='{}', index='{}', price='{}', lat='{}', lon='{}'",
            rec.product, rec.index_kind, rec.price, rec.latitude, rec.longitude
        ));

        let Some(family) = products.classify(rec.product) else {
            sink.append("  -> product not tracked, skipped");
            return LineOutcome::Skipped(SkipReason::UnknownProduct);
        };

        let Some(kind) = IndexKind::parse(rec.index_kind) else {
            sink.append(&format!("  -> {} but index is not MAX/MIN, skipped", family.label()));
            return LineOutcome::Skipped(SkipReason::BadIndex);
        };

        let cat = PriceCategory::new(family, kind);
        let price = rec.price_value();
        let outcome = match &self.entries[cat.index()] {
            None => LineOutcome::Seeded(cat),
            Some(cur) if kind.beats(price, cur.price) => LineOutcome::Updated(cat),
            Some(_) => LineOutcome::Kept(cat),
        };

        match outcome {
            LineOutcome::Seeded(_) => sink.append(&format!("  -> NEW value for {cat}: price={price:.2}")),
            LineOutcome::Updated(_) => sink.append(&format!("  -> UPDATE {cat}: price={price:.2}")),
            _ => sink.append("  -> not more extreme, keeping current"),
        }
        if !matches!(outcome, LineOutcome::Kept(_)) {
            self.entries[cat.index()] = Some(ExtremumEntry::from_record(&rec));
        }
        outcome
    }

    pub fn entry(&self, cat: PriceCategory) -> Option<&ExtremumEntry> {
        self.entries[cat.index()].as_ref()
    }

    /// Coordinates of a present entry.
    pub fn coordinates_of(&self, cat: PriceCategory) -> Option<(f64, f64)> {
        self.entry(cat).map(ExtremumEntry::coordinates)
    }

    #[inline]
    pub fn is_present(&self, cat: PriceCategory) -> bool { self.entries[cat.index()].is_some() }

    pub fn found(&self) -> usize { self.entries.iter().filter(|e| e.is_some()).count() }

    pub fn is_empty(&self) -> bool { self.found() == 0 }
}
