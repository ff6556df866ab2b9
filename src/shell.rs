// src/shell.rs
use std::process::Command;

use crate::config::consts::MAPS_SEARCH_URL;

/// Map search URL for a point, coordinates with 6 decimals.
pub fn map_url(lat: f64, lon: f64) -> String {
    format!("{MAPS_SEARCH_URL}{lat:.6},{lon:.6}")
}

/// Ask the OS to open the map for a point. Failures are logged, never surfaced.
pub fn open_map(lat: f64, lon: f64) {
    let url = map_url(lat, lon);
    match open_url(&url) {
        Ok(()) => logf!("Shell: opened {url}"),
        Err(e) => loge!("Shell: {e}"),
    }
}

/// Cross-platform "open with default handler".
fn open_url(url: &str) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    {
        Command::new("explorer")
            .arg(url)
            .spawn()
            .map_err(|e| format!("Failed to spawn explorer: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(url)
            .spawn()
            .map_err(|e| format!("Failed to spawn open: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open")
            .arg(url)
            .spawn()
            .map_err(|e| format!("Failed to spawn xdg-open: {}", e))?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = url;
        Err("Opening URLs not supported on this platform".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::map_url;

    #[test]
    fn url_has_six_decimals() {
        assert_eq!(
            map_url(-34.0, -58.5),
            "https://www.google.com/maps/search/?api=1&query=-34.000000,-58.500000"
        );
    }
}
