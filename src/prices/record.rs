// src/prices/record.rs
//
// One `|`-delimited line of precios.txt:
//   indexKind|timeIndex|address|locality|product|price|flagCompany|company|latitude|longitude
//
// Fields past the tenth are ignored. Each field is trimmed at the end; an
// empty field counts as missing.

use crate::config::consts::{FIELD_COUNT, FIELD_SEP};
use crate::core::numeric::leading_f64;

#[derive(Clone, Debug, PartialEq)]
pub struct PriceRecord<'a> {
    pub index_kind: &'a str,
    pub time_index: Option<&'a str>,
    pub address: Option<&'a str>,
    pub locality: Option<&'a str>,
    pub product: &'a str,
    pub price: &'a str,
    pub flag_company: Option<&'a str>,
    pub company: Option<&'a str>,
    pub latitude: &'a str,
    pub longitude: &'a str,
}

impl<'a> PriceRecord<'a> {
    /// `None` when any of index kind, product, price, latitude or longitude is missing.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut f: [Option<&'a str>; FIELD_COUNT] = [None; FIELD_COUNT];
        for (slot, raw) in f.iter_mut().zip(line.split(FIELD_SEP)) {
            let v = raw.trim_end();
            if !v.is_empty() { *slot = Some(v); }
        }

        Some(Self {
            index_kind: f[0]?,
            time_index: f[1],
            address: f[2],
            locality: f[3],
            product: f[4]?,
            price: f[5]?,
            flag_company: f[6],
            company: f[7],
            latitude: f[8]?,
            longitude: f[9]?,
        })
    }

    pub fn price_value(&self) -> f64 { leading_f64(self.price) }

    pub fn coordinates(&self) -> (f64, f64) {
        (leading_f64(self.latitude), leading_f64(self.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::PriceRecord;

    #[test]
    fn full_line() {
        let r = PriceRecord::parse("MAX|2025-01|Av. Siempre Viva 1|CORRIENTES|Gas Oil Grado 3|1650.00|2|YPF|-27.46|-58.83\r\n").unwrap();
        assert_eq!(r.index_kind, "MAX");
        assert_eq!(r.address, Some("Av. Siempre Viva 1"));
        assert_eq!(r.company, Some("YPF"));
        assert_eq!(r.price_value(), 1650.0);
        assert_eq!(r.coordinates(), (-27.46, -58.83));
    }

    #[test]
    fn short_line_is_rejected() {
        assert!(PriceRecord::parse("MAX|t|a|l|Gas Oil Grado 3|10").is_none());
        assert!(PriceRecord::parse("").is_none());
    }

    #[test]
    fn empty_required_field_is_missing() {
        assert!(PriceRecord::parse("MAX|t|a|l|Gas Oil Grado 3||f|c|1|2").is_none());
        // Optional ones may be empty
        let r = PriceRecord::parse("MIN|||||1|||1|2");
        assert!(r.is_none()); // product empty
        let r = PriceRecord::parse("MIN||||P|1|||1|2").unwrap();
        assert_eq!(r.address, None);
        assert_eq!(r.product, "P");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let r = PriceRecord::parse("MIN|t|a|l|P|1|f|c|3|4|extra|more").unwrap();
        assert_eq!(r.longitude, "4");
    }
}
