//! CSV Dataset Loader Module
//! Reads the raw car listings file into a DataFrame using Polars.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset file not found or unreadable: {0}")]
    DataUnavailable(PathBuf),
    #[error("Failed to parse dataset: {0}")]
    Csv(PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the dataset file. A missing or unreadable file is reported as
    /// `DataUnavailable`; malformed content surfaces as `Csv`.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::DataUnavailable(path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| match e {
                PolarsError::IO { .. } => LoaderError::DataUnavailable(path.to_path_buf()),
                other => LoaderError::Csv(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_data_unavailable() {
        let path = Path::new("definitely-not-here.csv");
        match DatasetLoader::load_csv(path) {
            Err(LoaderError::DataUnavailable(p)) => assert_eq!(p, path),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }
}
