// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request { url: String, #[source] source: reqwest::Error },

    #[error("HTTP error: {status} {url}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("cannot open {path} for writing: {source}")]
    Open { path: PathBuf, #[source] source: io::Error },

    #[error("download interrupted after {written} bytes: {source}")]
    Stream { written: u64, #[source] source: io::Error },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, #[source] source: io::Error },

    #[error("no recognized prices in {0}")]
    NothingFound(String),
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error("cannot read {path}: {source}")]
    Input { path: PathBuf, #[source] source: io::Error },

    #[error("cannot write {path}: {source}")]
    Output { path: PathBuf, #[source] source: io::Error },

    #[error("CSV read failed: {0}")]
    Read(#[source] io::Error),

    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV header lacks column '{0}'")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },

    #[error("cannot write config {path}: {source}")]
    Write { path: PathBuf, #[source] source: io::Error },

    #[error("bad value for '{key}': {value}")]
    Value { key: String, value: String },
}
