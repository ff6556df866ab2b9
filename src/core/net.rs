// src/core/net.rs
//
// Best-effort HTTP(S) download straight to disk. Callers get a bool; the
// reason for a failure only goes to the debug log.

use std::{
    fs::{self, File},
    io::{BufWriter, Read, Write},
    path::Path,
    time::{Duration, SystemTime},
};

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

const CHUNK: usize = 4096;

/// Download `url` into `dest`. Returns `false` on any failure.
///
/// `dest` is only created once the server answered with a success status, so
/// connection errors leave an existing file alone. A read error mid-body can
/// leave it partially written.
pub fn fetch(url: &str, dest: &Path, timeout: Duration) -> bool {
    match try_fetch(url, dest, timeout) {
        Ok(bytes) => {
            logf!("Fetch: {url} → {} ({bytes} bytes)", dest.display());
            true
        }
        Err(e) => {
            loge!("Fetch: {e}");
            false
        }
    }
}

pub fn try_fetch(url: &str, dest: &Path, timeout: Duration) -> Result<u64, FetchError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::Client)?;

    let mut resp = client
        .get(url)
        .send()
        .map_err(|e| FetchError::Request { url: s!(url), source: e })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: s!(url), status });
    }

    let file = File::create(dest)
        .map_err(|e| FetchError::Open { path: dest.to_path_buf(), source: e })?;
    let mut out = BufWriter::new(file);

    let mut buf = [0u8; CHUNK];
    let mut written: u64 = 0;
    loop {
        let n = resp.read(&mut buf)
            .map_err(|e| FetchError::Stream { written, source: e })?;
        if n == 0 { break; }
        out.write_all(&buf[..n])
            .map_err(|e| FetchError::Stream { written, source: e })?;
        written += n as u64;
    }
    out.flush().map_err(|e| FetchError::Stream { written, source: e })?;

    Ok(written)
}

/// Download only when `dest` is missing or older than `max_age`.
/// Returns `true` when `dest` is fresh afterwards.
pub fn refresh_if_stale(url: &str, dest: &Path, max_age: Duration, timeout: Duration) -> bool {
    if let Some(age) = file_age(dest) {
        if age < max_age {
            logd!("Fetch: {} is {:.1} min old, keeping it", dest.display(), age.as_secs_f64() / 60.0);
            return true;
        }
        logf!("Fetch: {} is stale ({:.1} min), refreshing", dest.display(), age.as_secs_f64() / 60.0);
    }
    fetch(url, dest, timeout)
}

fn file_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    SystemTime::now().duration_since(modified).ok()
}
