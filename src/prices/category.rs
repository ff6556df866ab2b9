// src/prices/category.rs
use std::fmt;
use std::str::FromStr;

use crate::config::consts::{PRODUCT_DIESEL, PRODUCT_NAFTA};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FuelFamily {
    Nafta,
    Diesel,
}

impl FuelFamily {
    pub fn label(&self) -> &'static str {
        match self { FuelFamily::Nafta => "Nafta", FuelFamily::Diesel => "Diesel" }
    }
}

impl fmt::Display for FuelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { FuelFamily::Nafta => "nafta", FuelFamily::Diesel => "diesel" })
    }
}

impl FromStr for FuelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nafta" => Ok(FuelFamily::Nafta),
            "diesel" | "gasoil" => Ok(FuelFamily::Diesel),
            other => Err(format!("unknown fuel: {other}")),
        }
    }
}

/// `MAX` / `MIN` marker in the first column. Case-sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Max,
    Min,
}

impl IndexKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MAX" => Some(IndexKind::Max),
            "MIN" => Some(IndexKind::Min),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self { IndexKind::Max => "MAX", IndexKind::Min => "MIN" }
    }

    /// Strict comparison; ties are never more extreme.
    pub fn beats(&self, candidate: f64, current: f64) -> bool {
        match self {
            IndexKind::Max => candidate > current,
            IndexKind::Min => candidate < current,
        }
    }
}

/// The four tracked slots. Discriminants are the slot/line order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriceCategory {
    NaftaMax = 0,
    NaftaMin = 1,
    DieselMax = 2,
    DieselMin = 3,
}

impl PriceCategory {
    pub const COUNT: usize = 4;
    pub const ALL: [PriceCategory; Self::COUNT] = [
        PriceCategory::NaftaMax,
        PriceCategory::NaftaMin,
        PriceCategory::DieselMax,
        PriceCategory::DieselMin,
    ];

    pub fn new(family: FuelFamily, kind: IndexKind) -> Self {
        match (family, kind) {
            (FuelFamily::Nafta, IndexKind::Max)  => PriceCategory::NaftaMax,
            (FuelFamily::Nafta, IndexKind::Min)  => PriceCategory::NaftaMin,
            (FuelFamily::Diesel, IndexKind::Max) => PriceCategory::DieselMax,
            (FuelFamily::Diesel, IndexKind::Min) => PriceCategory::DieselMin,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub fn index(self) -> usize { self as usize }

    pub fn family(self) -> FuelFamily {
        match self {
            PriceCategory::NaftaMax | PriceCategory::NaftaMin => FuelFamily::Nafta,
            PriceCategory::DieselMax | PriceCategory::DieselMin => FuelFamily::Diesel,
        }
    }

    pub fn kind(self) -> IndexKind {
        match self {
            PriceCategory::NaftaMax | PriceCategory::DieselMax => IndexKind::Max,
            PriceCategory::NaftaMin | PriceCategory::DieselMin => IndexKind::Min,
        }
    }

    pub fn label(self) -> String {
        join!(self.family().label(), " ", self.kind().as_str())
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The two product names that count, matched exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Products {
    pub nafta: String,
    pub diesel: String,
}

impl Default for Products {
    fn default() -> Self {
        Self { nafta: s!(PRODUCT_NAFTA), diesel: s!(PRODUCT_DIESEL) }
    }
}

impl Products {
    pub fn classify(&self, product: &str) -> Option<FuelFamily> {
        if product == self.nafta {
            Some(FuelFamily::Nafta)
        } else if product == self.diesel {
            Some(FuelFamily::Diesel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_fixed() {
        for (i, c) in PriceCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(PriceCategory::from_index(i), Some(*c));
            assert_eq!(PriceCategory::new(c.family(), c.kind()), *c);
        }
        assert_eq!(PriceCategory::from_index(4), None);
    }

    #[test]
    fn index_kind_is_exact() {
        assert_eq!(IndexKind::parse("MAX"), Some(IndexKind::Max));
        assert_eq!(IndexKind::parse("max"), None);
        assert_eq!(IndexKind::parse("MAX "), None);
        assert!(!IndexKind::Max.beats(10.0, 10.0));
        assert!(!IndexKind::Min.beats(10.0, 10.0));
    }

    #[test]
    fn fuel_round_trips_through_config_text() {
        assert_eq!("Diesel".parse::<FuelFamily>(), Ok(FuelFamily::Diesel));
        assert_eq!(FuelFamily::Nafta.to_string().parse::<FuelFamily>(), Ok(FuelFamily::Nafta));
        assert!("lpg".parse::<FuelFamily>().is_err());
    }
}
