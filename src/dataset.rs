//! Loading of JSON datasets (the catalogue and the sales records).

use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// The ways loading a dataset can fail.
///
/// Every variant names the file that could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid format in {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not encoded in UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One line item from the sales dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SaleRecord {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
}

/// Reads the JSON file at `path` as an array of `T`.
///
/// The whole file is read and closed before it is parsed.
///
/// # Errors
///
/// Returns:
/// * [`LoadError::NotFound`] if there is no file at `path`
/// * [`LoadError::Encoding`] if the file is not valid UTF-8
/// * [`LoadError::Format`] if the file is not a JSON array of the expected
///   records
/// * [`LoadError::Io`] if the file exists but cannot be read
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
        path: path.to_path_buf(),
    })?;
    let records: Vec<T> = serde_json::from_str(&text).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads sales records from the JSON file at `path`.
///
/// # Errors
///
/// Returns any error from [`load`].
pub fn read_sales(path: impl AsRef<Path>) -> Result<Vec<SaleRecord>, LoadError> {
    load(path)
}
