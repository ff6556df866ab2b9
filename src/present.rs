// src/present.rs
//
// Display lines for the widget. Lines 0..=3 are the four price slots in
// PriceCategory order and are clickable; later lines are derived text
// (trip budget, vehicle) and map to no category.

use crate::config::options::TripOptions;
use crate::prices::{ExtremumEntry, IndexKind, PriceCategory, PriceTable};

pub struct Presenter<'a> {
    table: &'a PriceTable,
    trip: &'a TripOptions,
}

impl<'a> Presenter<'a> {
    pub fn new(table: &'a PriceTable, trip: &'a TripOptions) -> Self {
        Self { table, trip }
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines: Vec<String> = PriceCategory::ALL
            .iter()
            .map(|&cat| price_line(cat, self.table.entry(cat)))
            .collect();
        lines.push(self.trip_line());
        lines.push(self.vehicle_line());
        lines
    }

    pub fn render_text(&self) -> String {
        self.render().join("\n")
    }

    /// Only the first four lines map to a category.
    pub fn line_index_to_category(index: usize) -> Option<PriceCategory> {
        PriceCategory::from_index(index)
    }

    /// Map target for a clicked line, if that line is a present price slot.
    pub fn coordinates_for_line(&self, index: usize) -> Option<(f64, f64)> {
        Self::line_index_to_category(index).and_then(|cat| self.table.coordinates_of(cat))
    }

    /// Line under a click at vertical offset `y`. `None` above the first line.
    pub fn row_at(y: f32, top_margin: f32, line_height: f32) -> Option<usize> {
        if line_height <= 0.0 { return None; }
        let rel = y - top_margin;
        if rel < 0.0 { return None; }
        Some((rel / line_height) as usize)
    }

    /// Cheapest and dearest cost of the configured trip, if both prices exist.
    pub fn trip_cost(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.price_range()?;
        let litres = self.trip.litres();
        Some((litres * lo, litres * hi))
    }

    fn price_range(&self) -> Option<(f64, f64)> {
        let fuel = self.trip.fuel;
        let lo = self.table.entry(PriceCategory::new(fuel, IndexKind::Min))?.price;
        let hi = self.table.entry(PriceCategory::new(fuel, IndexKind::Max))?.price;
        Some((lo, hi))
    }

    fn trip_line(&self) -> String {
        let t = self.trip;
        match self.trip_cost() {
            Some((lo, hi)) => format!(
                "Trip {:.0} km ({:.1} L): ${:.0} - ${:.0}",
                t.km, t.litres(), lo, hi
            ),
            None => format!("Trip {:.0} km: no {} prices", t.km, t.fuel),
        }
    }

    fn vehicle_line(&self) -> String {
        let t = self.trip;
        let head = format!(
            "{}: {}, {:.1} L/100km, tank {:.0} L",
            t.vehicle_name, t.fuel, t.consumption_l_per_100km, t.tank_litres
        );
        match self.price_range() {
            Some((lo, _)) => format!("{head} (full ${:.0})", t.tank_litres * lo),
            None => head,
        }
    }
}

fn price_line(cat: PriceCategory, entry: Option<&ExtremumEntry>) -> String {
    let Some(e) = entry else {
        return format!("{cat}: no data");
    };
    let mut line = format!("{cat}: ${:.2}", e.price);
    if !e.company.is_empty() {
        line.push(' ');
        line.push_str(&e.company);
    }
    if !e.locality.is_empty() {
        line.push_str(&join!(" (", &e.locality, ")"));
    }
    line
}
