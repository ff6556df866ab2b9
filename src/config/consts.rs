// src/config/consts.rs

// Net config
pub const REMOTE_URL: &str = "https://miMiniWeb/precios.txt";
pub const FETCH_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = "fuel_widget/0.3";

// Local files
pub const PRICES_FILE: &str = "precios.txt";
pub const TRACE_FILE: &str = "widget_log.txt";
pub const CONFIG_FILE: &str = "fuel_widget.cfg";
pub const LOG_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Price file layout
pub const FIELD_SEP: char = '|';
pub const FIELD_COUNT: usize = 10;
pub const MAX_LINE_BYTES: usize = 511; // legacy 512-byte line buffer

// Recognized products (exact match)
pub const PRODUCT_NAFTA: &str = "Nafta (súper) entre 92 y 95 Ron";
pub const PRODUCT_DIESEL: &str = "Gas Oil Grado 3";

// Snapshot capacities, terminator included
pub const CAP_PRODUCT: usize = 32;
pub const CAP_ADDRESS: usize = 128;
pub const CAP_LOCALITY: usize = 64;
pub const CAP_COMPANY: usize = 64;

// Map
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

// Trip budget
pub const TRIP_KM: f64 = 320.0;
pub const CONSUMPTION_L_PER_100KM: f64 = 7.5;
pub const TANK_LITRES: f64 = 50.0;
pub const VEHICLE_NAME: &str = "Sedan";

// Window
pub const WINDOW_W: f32 = 350.0;
pub const WINDOW_H: f32 = 230.0;
pub const WINDOW_MARGIN: f32 = 20.0;
pub const TOP_MARGIN: f32 = 5.0;
pub const LINE_HEIGHT: f32 = 18.0;
pub const APP_TITLE: &str = "Widget Viaje";

// Digest (raw government CSV → precios.txt)
pub const RAW_CSV_URL: &str = "http://datos.energia.gob.ar/dataset/1c181390-5045-475e-94dc-410429be4b17/resource/80ac25de-a44a-4445-9215-090cf55cfda5/download/precios-en-surtidor-resolucin-3142016.csv";
pub const RAW_CSV_FILE: &str = "precios-en-surtidor-resolucin-3142016.csv";
pub const RAW_CSV_MAX_AGE_SECS: u64 = 3600;
pub const RAW_CSV_TIMEOUT_SECS: u64 = 120;
pub const DIGEST_LOCALITIES: &[&str] = &["CORRIENTES", "PASO DE LOS LIBRES"];
pub const DIGEST_COMPANIES: &[&str] = &["2", "4", "28"]; // 2=YPF, 4=Shell, 28=PUMA
pub const DIGEST_SCHEDULE: &str = "Diurno";
pub const DIGEST_FLOOR_GASOIL: f64 = 1600.0;
pub const DIGEST_FLOOR_NAFTA: f64 = 1500.0;
pub const DIGEST_MAX_DEVIATION: f64 = 150.0;
