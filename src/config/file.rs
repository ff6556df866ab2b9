// src/config/file.rs
//
// Plain `key=value` config file. `#` starts a comment line, booleans accept
// `1`/`true`, lists are comma separated. Unknown keys are ignored and values
// that fail to parse keep whatever was there before.

use std::{fs, io, path::{Path, PathBuf}, str::FromStr};

use super::options::WidgetOptions;
use crate::error::ConfigError;

/// Load options from `path`. A missing file yields defaults.
pub fn load(path: &Path) -> Result<WidgetOptions, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            logf!("Config: loaded {}", path.display());
            Ok(parse(&text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            logd!("Config: {} not found, using defaults", path.display());
            Ok(WidgetOptions::default())
        }
        Err(e) => Err(ConfigError::Read { path: path.to_path_buf(), source: e }),
    }
}

pub fn parse(text: &str) -> WidgetOptions {
    let mut opts = WidgetOptions::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim();
            let val = line[eq + 1..].trim();
            if let Err(e) = apply(&mut opts, key, val) {
                loge!("Config: {e}");
            }
        }
    }
    opts
}

/// Set a single key. Also used by the CLI for flag overrides.
pub fn apply(opts: &mut WidgetOptions, key: &str, val: &str) -> Result<(), ConfigError> {
    match key {
        "remote_url"          => opts.net.remote_url = s!(val),
        "fetch_on_start"      => opts.net.fetch_on_start = flag(val),
        "fetch_timeout_secs"  => opts.net.timeout_secs = number(key, val)?,

        "prices_path"         => opts.prices.path = PathBuf::from(val),
        "trace_path"          => {
            opts.prices.trace_path = if val.is_empty() { None } else { Some(PathBuf::from(val)) };
        }
        "product_nafta"       => opts.prices.products.nafta = s!(val),
        "product_diesel"      => opts.prices.products.diesel = s!(val),

        "trip_km"             => opts.trip.km = number(key, val)?,
        "consumption"         => opts.trip.consumption_l_per_100km = number(key, val)?,
        "tank_litres"         => opts.trip.tank_litres = number(key, val)?,
        "vehicle_name"        => opts.trip.vehicle_name = s!(val),
        "vehicle_fuel"        => opts.trip.fuel = number(key, val)?,

        "window_w"            => opts.window.width = number(key, val)?,
        "window_h"            => opts.window.height = number(key, val)?,
        "window_margin"       => opts.window.margin = number(key, val)?,
        "always_on_top"       => opts.window.always_on_top = flag(val),

        "digest_url"          => opts.digest.source_url = s!(val),
        "digest_input"        => opts.digest.input = PathBuf::from(val),
        "digest_output"       => opts.digest.output = PathBuf::from(val),
        "digest_max_age_secs" => opts.digest.max_age_secs = number(key, val)?,
        "digest_timeout_secs" => opts.digest.timeout_secs = number(key, val)?,
        "digest_localities"   => opts.digest.localities = list(val),
        "digest_companies"    => opts.digest.companies = list(val),
        "digest_schedule"     => opts.digest.schedule = s!(val),
        "digest_floor_gasoil" => opts.digest.floor_gasoil = number(key, val)?,
        "digest_floor_nafta"  => opts.digest.floor_nafta = number(key, val)?,
        "digest_max_deviation"=> opts.digest.max_deviation = number(key, val)?,

        other => logd!("Config: ignoring unknown key '{other}'"),
    }
    Ok(())
}

pub fn save(path: &Path, opts: &WidgetOptions) -> Result<(), ConfigError> {
    let mut s = s!();
    let mut put = |k: &str, v: String| s.push_str(&format!("{k}={v}\n"));

    put("remote_url", opts.net.remote_url.clone());
    put("fetch_on_start", bit(opts.net.fetch_on_start));
    put("fetch_timeout_secs", opts.net.timeout_secs.to_string());
    put("prices_path", opts.prices.path.display().to_string());
    put("trace_path", opts.prices.trace_path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default());
    put("product_nafta", opts.prices.products.nafta.clone());
    put("product_diesel", opts.prices.products.diesel.clone());
    put("trip_km", opts.trip.km.to_string());
    put("consumption", opts.trip.consumption_l_per_100km.to_string());
    put("tank_litres", opts.trip.tank_litres.to_string());
    put("vehicle_name", opts.trip.vehicle_name.clone());
    put("vehicle_fuel", opts.trip.fuel.to_string());
    put("window_w", opts.window.width.to_string());
    put("window_h", opts.window.height.to_string());
    put("window_margin", opts.window.margin.to_string());
    put("always_on_top", bit(opts.window.always_on_top));
    put("digest_url", opts.digest.source_url.clone());
    put("digest_input", opts.digest.input.display().to_string());
    put("digest_output", opts.digest.output.display().to_string());
    put("digest_max_age_secs", opts.digest.max_age_secs.to_string());
    put("digest_timeout_secs", opts.digest.timeout_secs.to_string());
    put("digest_localities", opts.digest.localities.join(","));
    put("digest_companies", opts.digest.companies.join(","));
    put("digest_schedule", opts.digest.schedule.clone());
    put("digest_floor_gasoil", opts.digest.floor_gasoil.to_string());
    put("digest_floor_nafta", opts.digest.floor_nafta.to_string());
    put("digest_max_deviation", opts.digest.max_deviation.to_string());

    fs::write(path, s).map_err(|e| ConfigError::Write { path: path.to_path_buf(), source: e })
}

fn flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn bit(b: bool) -> String {
    s!(if b { "1" } else { "0" })
}

fn number<T: FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.parse().map_err(|_| ConfigError::Value { key: s!(key), value: s!(val) })
}

fn list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
