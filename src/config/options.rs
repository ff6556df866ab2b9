// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::prices::{FuelFamily, Products};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct WidgetOptions {
    pub net: NetOptions,
    pub prices: PriceOptions,
    pub trip: TripOptions,
    pub window: WindowOptions,
    pub digest: DigestOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetOptions {
    pub remote_url: String,
    pub fetch_on_start: bool,
    pub timeout_secs: u64,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            remote_url: s!(REMOTE_URL),
            fetch_on_start: true,
            timeout_secs: FETCH_TIMEOUT_SECS,
        }
    }
}

impl NetOptions {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceOptions {
    pub path: PathBuf,
    /// Decision trace target; `None` disables tracing.
    pub trace_path: Option<PathBuf>,
    pub products: Products,
}

impl Default for PriceOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(PRICES_FILE),
            trace_path: Some(PathBuf::from(TRACE_FILE)),
            products: Products::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TripOptions {
    pub km: f64,
    pub consumption_l_per_100km: f64,
    pub tank_litres: f64,
    pub vehicle_name: String,
    pub fuel: FuelFamily,
}

impl Default for TripOptions {
    fn default() -> Self {
        Self {
            km: TRIP_KM,
            consumption_l_per_100km: CONSUMPTION_L_PER_100KM,
            tank_litres: TANK_LITRES,
            vehicle_name: s!(VEHICLE_NAME),
            fuel: FuelFamily::Nafta,
        }
    }
}

impl TripOptions {
    /// Litres burned over the configured distance.
    pub fn litres(&self) -> f64 {
        self.km * self.consumption_l_per_100km / 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowOptions {
    pub width: f32,
    pub height: f32,
    /// Distance from the top-right screen corner.
    pub margin: f32,
    pub always_on_top: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: WINDOW_W,
            height: WINDOW_H,
            margin: WINDOW_MARGIN,
            always_on_top: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DigestOptions {
    pub source_url: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub max_age_secs: u64,
    pub timeout_secs: u64,
    pub localities: Vec<String>,
    pub companies: Vec<String>,
    pub schedule: String,
    pub floor_gasoil: f64,
    pub floor_nafta: f64,
    pub max_deviation: f64,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            source_url: s!(RAW_CSV_URL),
            input: PathBuf::from(RAW_CSV_FILE),
            output: PathBuf::from(PRICES_FILE),
            max_age_secs: RAW_CSV_MAX_AGE_SECS,
            timeout_secs: RAW_CSV_TIMEOUT_SECS,
            localities: DIGEST_LOCALITIES.iter().map(|s| s!(*s)).collect(),
            companies: DIGEST_COMPANIES.iter().map(|s| s!(*s)).collect(),
            schedule: s!(DIGEST_SCHEDULE),
            floor_gasoil: DIGEST_FLOOR_GASOIL,
            floor_nafta: DIGEST_FLOOR_NAFTA,
            max_deviation: DIGEST_MAX_DEVIATION,
        }
    }
}
