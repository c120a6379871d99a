//! Loading input files (features, references, requests) as YAML or JSON.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    ReadFile(#[from] io::Error),
    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse input (tried YAML and JSON)")]
    ParseFailed,
}

/// Loads a YAML or JSON file. A path of `-` reads stdin.
pub fn load_request<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    if path == Path::new("-") {
        return load_request_from_stdin();
    }
    let data = fs::read(path)?;
    parse_request(&data, path)
}

/// Parses by file extension; unknown extensions try YAML, then JSON.
pub fn parse_request<T: DeserializeOwned>(
    data: &[u8],
    path: impl AsRef<Path>,
) -> Result<T, LoadError> {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_slice(data)?),
        Some("json") => Ok(serde_json::from_slice(data)?),
        _ => parse_any(data),
    }
}

pub fn load_request_from_stdin<T: DeserializeOwned>() -> Result<T, LoadError> {
    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;
    parse_any(&data)
}

fn parse_any<T: DeserializeOwned>(data: &[u8]) -> Result<T, LoadError> {
    if let Ok(v) = serde_yaml::from_slice(data) {
        return Ok(v);
    }
    if let Ok(v) = serde_json::from_slice(data) {
        return Ok(v);
    }
    Err(LoadError::ParseFailed)
}
