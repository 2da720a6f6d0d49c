//! Tabular parameter source.
//!
//! A data file is a workbook of named sheets, each an ordered list of rows.
//! Every row is one run of a case and maps parameter names to string values:
//!
//! ```toml
//! [[Sheet1]]
//! B = "68656c6c6f000000000000000000000000000000000000000000000000000000"
//! C = "616263"
//! ```

use serde::{de::DeserializeOwned, Deserialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("couldn't read data file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid data file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("parameter '{0}' is missing")]
    MissingParam(String),
    #[error("invalid parameters: {0}")]
    InvalidParams(serde_json::Error),
}

/// Named parameters of a single row. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, key: &str) -> Result<&str, DataSourceError> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| DataSourceError::MissingParam(key.to_string()))
    }

    /// Converts the row into a typed parameter record.
    ///
    /// Fields absent from the row are reported as [`DataSourceError::MissingParam`].
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, DataSourceError> {
        let value = serde_json::to_value(&self.0).map_err(DataSourceError::InvalidParams)?;
        serde_json::from_value(value).map_err(|err| {
            match missing_field(&err.to_string()) {
                Some(field) => DataSourceError::MissingParam(field),
                None => DataSourceError::InvalidParams(err),
            }
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// serde reports absent struct fields as "missing field `name`"
fn missing_field(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Workbook {
    sheets: BTreeMap<String, Vec<Params>>,
}

impl Workbook {
    pub fn load(path: &Path) -> Result<Self, DataSourceError> {
        let content = std::fs::read_to_string(path).map_err(|source| DataSourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let workbook: Self = content.parse()?;
        tracing::debug!(
            path = %path.display(),
            sheets = workbook.sheets.len(),
            "data file loaded"
        );
        Ok(workbook)
    }

    pub fn sheet(&self, name: &str) -> Result<&[Params], DataSourceError> {
        self.sheets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DataSourceError::SheetNotFound(name.to_string()))
    }
}

impl std::str::FromStr for Workbook {
    type Err = DataSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
