// tests/price_table.rs
//
// Loader + reducer behaviour against files on disk.
//
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use fuel_widget::prices::{
    LineOutcome, NullTrace, PriceCategory::{self, *}, PriceTable, Products, SkipReason, VecTrace,
};

const NAFTA: &str = "Nafta (súper) entre 92 y 95 Ron";
const DIESEL: &str = "Gas Oil Grado 3";

fn tmp_file(name: &str, contents: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("fw_table_{}", name));
    fs::write(&p, contents).unwrap();
    p
}

fn row(kind: &str, product: &str, price: &str, addr: &str, lat: &str, lon: &str) -> String {
    format!("{kind}|2025-01|{addr}|CORRIENTES|{product}|{price}|2|YPF|{lat}|{lon}\n")
}

fn price(t: &PriceTable, c: PriceCategory) -> f64 {
    t.entry(c).unwrap().price
}

#[test]
fn one_row_per_category() {
    let text = [
        row("MAX", NAFTA, "1700.50", "A1", "-27.1", "-58.1"),
        row("MIN", NAFTA, "1550.00", "A2", "-27.2", "-58.2"),
        row("MAX", DIESEL, "1800.25", "A3", "-27.3", "-58.3"),
        row("MIN", DIESEL, "1650.75", "A4", "-27.4", "-58.4"),
    ].concat();
    let path = tmp_file("one_each.txt", &text);

    let mut t = PriceTable::new();
    assert!(t.load(&path));
    assert_eq!(price(&t, NaftaMax), 1700.50);
    assert_eq!(price(&t, NaftaMin), 1550.00);
    assert_eq!(price(&t, DieselMax), 1800.25);
    assert_eq!(price(&t, DieselMin), 1650.75);
    assert_eq!(t.coordinates_of(DieselMin), Some((-27.4, -58.4)));
    assert_eq!(t.entry(NaftaMax).unwrap().address, "A1");
    assert_eq!(t.entry(NaftaMax).unwrap().company, "YPF");
}

#[test]
fn example_from_the_format_description() {
    let products = Products { nafta: "ProductA".into(), diesel: "ProductB".into() };
    let path = tmp_file(
        "example.txt",
        "MAX|t|Addr1|Loc1|ProductA|100.5|f|CompX|-34.0|-58.0\nMIN|t|Addr2|Loc2|ProductA|80.0|f|CompY|-34.1|-58.1\n",
    );

    let mut t = PriceTable::new();
    assert!(t.load_with_sink(&path, &products, &mut NullTrace));
    assert_eq!(price(&t, NaftaMax), 100.5);
    assert_eq!(price(&t, NaftaMin), 80.0);
    assert!(t.entry(DieselMax).is_none());
    assert!(t.entry(DieselMin).is_none());
}

#[test]
fn max_and_min_reduce_over_many_rows() {
    let prices = ["1600", "1720.5", "1580", "1719", "1600"];
    let mut text = String::new();
    for (i, p) in prices.iter().enumerate() {
        text.push_str(&row("MAX", DIESEL, p, &format!("S{i}"), "1", "2"));
        text.push_str(&row("MIN", DIESEL, p, &format!("S{i}"), "1", "2"));
    }
    let path = tmp_file("many.txt", &text);

    let mut t = PriceTable::new();
    assert!(t.load(&path));
    assert_eq!(price(&t, DieselMax), 1720.5);
    assert_eq!(price(&t, DieselMin), 1580.0);
    // Updates carry the whole station along
    assert_eq!(t.entry(DieselMax).unwrap().address, "S1");
    assert_eq!(t.entry(DieselMin).unwrap().address, "S2");
}

#[test]
fn ties_keep_first_seen() {
    let text = [
        row("MAX", NAFTA, "1700", "first", "1", "1"),
        row("MAX", NAFTA, "1700", "second", "2", "2"),
        row("MIN", NAFTA, "1500", "first", "1", "1"),
        row("MIN", NAFTA, "1500.0", "second", "2", "2"),
    ].concat();
    let (t, sum) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);

    assert_eq!(t.entry(NaftaMax).unwrap().address, "first");
    assert_eq!(t.entry(NaftaMin).unwrap().address, "first");
    assert_eq!(sum.seeded, 2);
    assert_eq!(sum.kept, 2);
    assert_eq!(sum.updated, 0);
}

#[test]
fn load_is_idempotent() {
    let text = [
        row("MAX", NAFTA, "1700", "a", "1", "1"),
        row("MIN", DIESEL, "1600", "b", "2", "2"),
    ].concat();
    let path = tmp_file("idem.txt", &text);

    let mut t = PriceTable::new();
    assert!(t.load(&path));
    let first = t.clone();
    assert!(t.load(&path));
    assert_eq!(t, first);
}

#[test]
fn short_lines_never_change_entries() {
    let text = [
        row("MAX", NAFTA, "1700", "a", "1", "1"),
        format!("MAX|t|a|l|{NAFTA}|9999\n"),
        format!("MAX|t|a|l|{NAFTA}|9999|f|c|1\n"),
        format!("MAX|t|a|l|{NAFTA}||f|c|1|2\n"),
        s("\n"),
    ].concat();
    let (t, sum) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);

    assert_eq!(price(&t, NaftaMax), 1700.0);
    assert_eq!(sum.missing_fields, 4);
    assert_eq!(sum.lines, 5);
}

#[test]
fn unknown_products_never_change_entries() {
    let text = [
        row("MIN", DIESEL, "1600", "a", "1", "1"),
        row("MIN", "Gas Oil Grado 2", "1", "b", "1", "1"),
        row("MIN", "gas oil grado 3", "1", "c", "1", "1"),
        row("MAX", "GNC", "99999", "d", "1", "1"),
    ].concat();
    let (t, sum) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);

    assert_eq!(price(&t, DieselMin), 1600.0);
    assert_eq!(t.found(), 1);
    assert_eq!(sum.unknown_product, 3);
}

#[test]
fn index_kind_must_be_exact() {
    let mut t = PriceTable::new();
    let products = Products::default();
    for kind in ["max", "Min", "AVG", "MAX "] {
        let line = row(kind, NAFTA, "1700", "a", "1", "1");
        let out = t.ingest_line(&line, &products, &mut NullTrace);
        // "MAX " is trimmed to "MAX" and therefore counts
        if kind == "MAX " {
            assert_eq!(out, LineOutcome::Seeded(NaftaMax));
        } else {
            assert_eq!(out, LineOutcome::Skipped(SkipReason::BadIndex), "{kind}");
        }
    }
}

#[test]
fn header_line_is_ignored() {
    let text = [
        s("indice_precio|indice_tiempo|direccion|localidad|producto|precio|idempresabandera|empresabandera|latitud|longitud\n"),
        row("MAX", NAFTA, "1700", "a", "1", "1"),
    ].concat();
    let (t, sum) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);
    assert_eq!(t.found(), 1);
    assert_eq!(sum.unknown_product, 1);
}

#[test]
fn non_numeric_values_read_as_zero() {
    let text = row("MIN", NAFTA, "n/a", "a", "north", "-58.5xyz");
    let (t, _) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);
    let e = t.entry(NaftaMin).unwrap();
    assert_eq!(e.price, 0.0);
    assert_eq!(e.coordinates(), (0.0, -58.5));
}

#[test]
fn recognised_file_without_matches_fails() {
    let path = tmp_file("nothing.txt", &row("MAX", "Kerosene", "1", "a", "1", "1"));
    let mut t = PriceTable::new();
    assert!(!t.load(&path));
    assert!(t.is_empty());
    for c in PriceCategory::ALL {
        assert!(t.entry(c).is_none());
        assert!(t.coordinates_of(c).is_none());
    }
}

#[test]
fn missing_file_fails_and_clears_previous_load() {
    let good = tmp_file("before_missing.txt", &row("MAX", NAFTA, "1700", "a", "1", "1"));
    let mut t = PriceTable::new();
    assert!(t.load(&good));

    let mut missing = std::env::temp_dir();
    missing.push("fw_table_does_not_exist.txt");
    let _ = fs::remove_file(&missing);

    let mut trace = VecTrace::default();
    assert!(!t.load_with_sink(&missing, &Products::default(), &mut trace));
    assert!(t.is_empty());
    assert!(trace.lines[0].starts_with("Opening file:"));
    assert!(trace.lines[1].starts_with("ERROR"));
    assert_eq!(trace.lines.len(), 2);
}

#[test]
fn overlong_line_is_cut_not_fatal() {
    // Key fields sit past byte 511, so the cut line lacks them
    let long_addr = "x".repeat(600);
    let text = [
        row("MAX", NAFTA, "1800", &long_addr, "1", "1"),
        row("MAX", NAFTA, "1700", "short", "1", "1"),
    ].concat();
    let (t, sum) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);
    assert_eq!(sum.lines, 2);
    assert_eq!(sum.missing_fields, 1);
    assert_eq!(price(&t, NaftaMax), 1700.0);
}

#[test]
fn latin1_line_within_buffer_keeps_its_fields() {
    // 200 raw bytes of Latin-1 'é' would decode to 600 bytes of U+FFFD
    let mut raw = b"MAX|2025-01|".to_vec();
    raw.extend_from_slice(&[0xE9; 200]);
    raw.extend_from_slice(format!("|CORRIENTES|{DIESEL}|1800|2|YPF|-27.4|-58.8\n").as_bytes());
    assert!(raw.len() < 512);

    let (t, sum) = PriceTable::from_reader(Cursor::new(raw), &Products::default(), &mut NullTrace);
    assert_eq!(sum.missing_fields, 0);
    let e = t.entry(DieselMax).unwrap();
    assert_eq!(e.price, 1800.0);
    assert_eq!(e.coordinates(), (-27.4, -58.8));
    assert_eq!(e.locality, "CORRIENTES");
}

#[test]
fn cut_lands_on_a_character_boundary() {
    // Multibyte address straddles byte 511; the cut backs off instead of leaving half a char
    let mut line = format!("MAX|t|{}", "é".repeat(300));
    line.push('\n');
    let mut trace = VecTrace::default();
    let (_, sum) = PriceTable::from_reader(Cursor::new(line), &Products::default(), &mut trace);
    assert_eq!(sum.missing_fields, 1);
    let logged = &trace.lines[0];
    assert!(!logged.contains('\u{FFFD}'));
    assert!(logged.ends_with('é'));
}

#[test]
fn snapshot_text_is_bounded() {
    let addr = "á".repeat(100); // 200 bytes
    let text = row("MAX", NAFTA, "1", &addr, "1", "1");
    let (t, _) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);
    let e = t.entry(NaftaMax).unwrap();
    assert!(e.address.len() <= 127);
    assert_eq!(e.address, "á".repeat(63));
}

#[test]
fn trace_does_not_change_results() {
    let text = [
        row("MAX", NAFTA, "1700", "a", "1", "1"),
        row("MAX", NAFTA, "1750", "b", "1", "1"),
        s("garbage\n"),
        row("MIN", DIESEL, "1600", "c", "1", "1"),
    ].concat();
    let products = Products::default();

    let (quiet, quiet_sum) = PriceTable::from_reader(Cursor::new(text.clone()), &products, &mut NullTrace);
    let mut trace = VecTrace::default();
    let (traced, traced_sum) = PriceTable::from_reader(Cursor::new(text), &products, &mut trace);

    assert_eq!(quiet, traced);
    assert_eq!(quiet_sum, traced_sum);
    assert!(trace.lines.iter().any(|l| l.contains("UPDATE Nafta MAX")));
    assert!(trace.lines.last().unwrap().starts_with("Summary: found=2"));
}

#[test]
fn crlf_and_trailing_spaces_are_trimmed() {
    let text = format!("MIN |t|a|l|{DIESEL} |1650.5 \r\n|f|c|1|2\r\nMIN|t|a|l|{DIESEL}|1650.5|f|c |-27.5 |-58.5\r\n");
    let (t, _) = PriceTable::from_reader(Cursor::new(text), &Products::default(), &mut NullTrace);
    let e = t.entry(DieselMin).unwrap();
    assert_eq!(e.price, 1650.5);
    assert_eq!(e.company, "c");
    assert_eq!(e.coordinates(), (-27.5, -58.5));
}

fn s(x: &str) -> String { x.to_string() }
