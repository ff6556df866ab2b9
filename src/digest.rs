// src/digest.rs
//! # Digest: raw government CSV → `precios.txt`
//!
//! The public "precios en surtidor" dataset lists every reported price for
//! every station in the country, historic rows included. The widget wants a
//! handful of lines: for each allowed city and tracked product, the dearest
//! and the cheapest *current* price.
//!
//! ## Pipeline
//! 1. **Filter** by locality, daytime schedule and flag company.
//! 2. **Classify** the product after normalising its name
//!    (uppercase, no accents, `GASOIL` → `GAS OIL`, single spaces).
//! 3. **Floor** prices: gas oil below 1600 and nafta below 1500 are treated as
//!    stale or typo'd and dropped.
//! 4. **Per station** (lat + lon + product) keep the newest `indice_tiempo`,
//!    the higher price on equal dates.
//! 5. **Per city and product**, keep stations within `max_deviation` of the
//!    dearest one, then emit the first MAX and the first MIN.
//! 6. **Write** a header and the rows sorted by (city, product, MAX/MIN),
//!    `|`-delimited, price with two decimals.
//!
//! Output lines follow the widget layout:
//! `indice_precio|indice_tiempo|direccion|localidad|producto|precio|idempresabandera|empresabandera|latitud|longitud`.

use std::{
    collections::HashMap,
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    time::Duration,
};

use crate::{
    config::{consts::FIELD_SEP, options::DigestOptions},
    core::{net, text::normalize_ws},
    csv::{self, HeaderIndex, RowReader},
    error::DigestError,
    prices::IndexKind,
};

pub const OUTPUT_HEADER: [&str; 10] = [
    "indice_precio",
    "indice_tiempo",
    "direccion",
    "localidad",
    "producto",
    "precio",
    "idempresabandera",
    "empresabandera",
    "latitud",
    "longitud",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductClass {
    GasOil2,
    GasOil3,
    NaftaSuper,
    NaftaPremium,
}

impl ProductClass {
    pub fn label(&self) -> &'static str {
        match self {
            ProductClass::GasOil2 => "GAS OIL GRADO 2",
            ProductClass::GasOil3 => "GAS OIL GRADO 3",
            ProductClass::NaftaSuper => "NAFTA SUPER",
            ProductClass::NaftaPremium => "NAFTA PREMIUM",
        }
    }

    pub fn is_gas_oil(&self) -> bool {
        matches!(self, ProductClass::GasOil2 | ProductClass::GasOil3)
    }
}

/// Uppercase, strip acute accents, unify `GASOIL`, collapse spaces.
pub fn normalize_product(name: &str) -> String {
    let upper: String = name
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            other => other,
        })
        .collect();
    normalize_ws(&upper.replace("GASOIL", "GAS OIL"))
}

pub fn classify_product(name: &str) -> Option<ProductClass> {
    let p = normalize_product(name);
    if p.contains("GAS OIL") && p.contains("GRADO 2") { return Some(ProductClass::GasOil2); }
    if p.contains("GAS OIL") && p.contains("GRADO 3") { return Some(ProductClass::GasOil3); }
    if p.contains("NAFTA") && p.contains("SUPER") { return Some(ProductClass::NaftaSuper); }
    if p.contains("NAFTA") && p.contains("PREMIUM") { return Some(ProductClass::NaftaPremium); }
    None
}

/// Strict price parse (`,` accepted as decimal point) with the per-product floor.
pub fn parse_price(raw: &str, class: ProductClass, opts: &DigestOptions) -> Option<f64> {
    let price: f64 = raw.trim().replace(',', ".").parse().ok()?;
    if !price.is_finite() { return None; }
    let floor = if class.is_gas_oil() { opts.floor_gasoil } else { opts.floor_nafta };
    (price >= floor).then_some(price)
}

/// A filtered, classified source row.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub time_index: String,
    pub address: String,
    pub locality: String,
    pub product: String,
    pub class: ProductClass,
    pub price: f64,
    pub company_id: String,
    pub company: String,
    pub latitude: String,
    pub longitude: String,
}

/// One output line: a candidate tagged MAX or MIN.
#[derive(Clone, Debug, PartialEq)]
pub struct DigestLine {
    pub kind: IndexKind,
    pub row: Candidate,
}

impl DigestLine {
    pub fn fields(&self) -> [String; 10] {
        let r = &self.row;
        [
            s!(self.kind.as_str()),
            r.time_index.clone(),
            r.address.clone(),
            r.locality.clone(),
            r.product.clone(),
            format!("{:.2}", r.price),
            r.company_id.clone(),
            r.company.clone(),
            r.latitude.clone(),
            r.longitude.clone(),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub stations: usize,
    pub lines_written: usize,
}

struct Columns {
    time_index: usize,
    address: usize,
    locality: usize,
    product: usize,
    schedule: usize,
    price: usize,
    company_id: usize,
    company: usize,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn resolve(header: &[String]) -> Result<Self, DigestError> {
        let idx = HeaderIndex::new(header);
        let col = |name: &'static str| idx.position(name).ok_or(DigestError::MissingColumn(name));
        Ok(Self {
            time_index: col("indice_tiempo")?,
            address: col("direccion")?,
            locality: col("localidad")?,
            product: col("producto")?,
            schedule: col("tipohorario")?,
            price: col("precio")?,
            company_id: col("idempresabandera")?,
            company: col("empresabandera")?,
            latitude: col("latitud")?,
            longitude: col("longitud")?,
        })
    }
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

/// Run steps 1–5 over CSV text. Lines come back sorted, ready to write.
pub fn digest_text(text: &str, opts: &DigestOptions) -> Result<(Vec<DigestLine>, DigestSummary), DigestError> {
    digest_reader(text.as_bytes(), opts)
}

/// Streaming form of [`digest_text`]: rows are filtered as they are read, so
/// only the kept candidates stay in memory.
pub fn digest_reader<R: BufRead>(reader: R, opts: &DigestOptions) -> Result<(Vec<DigestLine>, DigestSummary), DigestError> {
    let mut rows = RowReader::new(reader, ',');
    let header = rows.next().ok_or(DigestError::MissingHeader)?.map_err(DigestError::Read)?;
    let cols = Columns::resolve(&header)?;

    let mut summary = DigestSummary::default();
    let mut kept: Vec<Candidate> = Vec::new();

    for row in rows {
        let row = row.map_err(DigestError::Read)?;
        summary.rows_read += 1;

        let locality = cell(&row, cols.locality);
        if !opts.localities.iter().any(|l| l == locality) { continue; }
        if cell(&row, cols.schedule) != opts.schedule { continue; }
        let company_id = cell(&row, cols.company_id);
        if !opts.companies.iter().any(|c| c == company_id) { continue; }

        let product = cell(&row, cols.product);
        let Some(class) = classify_product(product) else { continue };
        let Some(price) = parse_price(cell(&row, cols.price), class, opts) else { continue };

        kept.push(Candidate {
            time_index: s!(cell(&row, cols.time_index)),
            address: s!(cell(&row, cols.address)),
            locality: s!(locality),
            product: s!(product),
            class,
            price,
            company_id: s!(company_id),
            company: s!(cell(&row, cols.company)),
            latitude: s!(cell(&row, cols.latitude)),
            longitude: s!(cell(&row, cols.longitude)),
        });
    }
    summary.rows_kept = kept.len();

    let stations = latest_per_station(kept);
    summary.stations = stations.len();

    let lines = extremes_per_city(stations, opts.max_deviation);
    logd!("Digest: read={} kept={} stations={} lines={}",
        summary.rows_read, summary.rows_kept, summary.stations, lines.len());

    Ok((lines, summary))
}

/// Newest report per (lat, lon, product); higher price on equal dates.
/// Order of first appearance is preserved.
fn latest_per_station(rows: Vec<Candidate>) -> Vec<Candidate> {
    let mut slots: HashMap<(String, String, ProductClass), usize> = HashMap::new();
    let mut out: Vec<Candidate> = Vec::new();

    for r in rows {
        if r.latitude.is_empty() || r.longitude.is_empty() || r.time_index.is_empty() { continue; }

        let key = (r.latitude.clone(), r.longitude.clone(), r.class);
        match slots.get(&key) {
            None => {
                slots.insert(key, out.len());
                out.push(r);
            }
            Some(&i) => {
                let cur = &out[i];
                let newer = r.time_index > cur.time_index;
                let same_date_dearer = r.time_index == cur.time_index && r.price > cur.price;
                if newer || same_date_dearer {
                    out[i] = r;
                }
            }
        }
    }
    out
}

/// MAX and MIN per (locality, product) within the deviation window, sorted.
fn extremes_per_city(stations: Vec<Candidate>, max_deviation: f64) -> Vec<DigestLine> {
    let mut group_of: HashMap<(String, ProductClass), usize> = HashMap::new();
    let mut groups: Vec<Vec<Candidate>> = Vec::new();

    for r in stations {
        if r.locality.is_empty() { continue; }
        let key = (r.locality.clone(), r.class);
        let gi = *group_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[gi].push(r);
    }

    let mut lines = Vec::with_capacity(groups.len() * 2);
    for group in groups {
        let Some(max_price) = group.iter().map(|r| r.price).reduce(f64::max) else { continue };

        let window: Vec<&Candidate> = group
            .iter()
            .filter(|r| r.price >= max_price - max_deviation)
            .collect();
        let pool: Vec<&Candidate> = if window.is_empty() { group.iter().collect() } else { window };

        // First occurrence wins on ties
        let mut hi = pool[0];
        let mut lo = pool[0];
        for r in &pool[1..] {
            if r.price > hi.price { hi = r; }
            if r.price < lo.price { lo = r; }
        }

        lines.push(DigestLine { kind: IndexKind::Max, row: hi.clone() });
        lines.push(DigestLine { kind: IndexKind::Min, row: lo.clone() });
    }

    lines.sort_by(|a, b| {
        (a.row.locality.as_str(), a.row.class.label(), a.kind.as_str())
            .cmp(&(b.row.locality.as_str(), b.row.class.label(), b.kind.as_str()))
    });
    lines
}

/// Header + lines in the widget's `|` format.
pub fn write_lines<W: Write>(mut w: W, lines: &[DigestLine]) -> io::Result<()> {
    csv::write_row(&mut w, &OUTPUT_HEADER, FIELD_SEP)?;
    for line in lines {
        csv::write_row(&mut w, &line.fields(), FIELD_SEP)?;
    }
    w.flush()
}

/// Full pipeline: optionally refresh the raw CSV, digest it, write `opts.output`.
pub fn run(opts: &DigestOptions, refresh: bool) -> Result<DigestSummary, DigestError> {
    if refresh {
        let fresh = net::refresh_if_stale(
            &opts.source_url,
            &opts.input,
            Duration::from_secs(opts.max_age_secs),
            Duration::from_secs(opts.timeout_secs),
        );
        if !fresh {
            logf!("Digest: refresh failed, using local {}", opts.input.display());
        }
    }

    let file = File::open(&opts.input)
        .map_err(|e| DigestError::Input { path: opts.input.clone(), source: e })?;

    let (lines, mut summary) = digest_reader(BufReader::new(file), opts)?;
    write_output(&opts.output, &lines)?;
    summary.lines_written = lines.len();

    logf!("Digest: wrote {} line(s) to {}", summary.lines_written, opts.output.display());
    Ok(summary)
}

fn write_output(path: &Path, lines: &[DigestLine]) -> Result<(), DigestError> {
    let err = |e| DigestError::Output { path: path.to_path_buf(), source: e };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(err)?;
        }
    }
    let file = File::create(path).map_err(err)?;
    write_lines(BufWriter::new(file), lines).map_err(err)
}
