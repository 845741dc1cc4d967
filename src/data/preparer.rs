//! Dataset Preparer Module
//! Cleans and encodes the raw car listings into the fixed numeric feature table.
//!
//! Pipeline: extract the manufacturer from the free-text car name, correct
//! known misspellings, map word-encoded counts to integers, one-hot encode the
//! remaining categorical columns (dropping the first value of each as the
//! reference level), then project to the six final columns.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::loader::{DatasetLoader, LoaderError};

/// Number words observed in the raw dataset. Anything else maps to null.
const WORD_NUMBERS: [(&str, i64); 7] = [
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("eight", 8),
    ("twelve", 12),
];

/// Known misspellings and variants of manufacturer names.
/// Matching is exact and case-sensitive.
const COMPANY_ALIASES: [(&str, &str); 6] = [
    ("vw", "volkswagen"),
    ("vokswagen", "volkswagen"),
    ("porcshce", "porsche"),
    ("toyouta", "toyota"),
    ("Nissan", "nissan"),
    ("maxda", "mazda"),
];

/// Columns of the final feature table, in output order.
pub const FINAL_COLUMNS: [&str; 6] = [
    "carwidth",
    "enginesize",
    "horsepower",
    "drivewheel_fwd",
    "car_company_buick",
    "price",
];

const NAME_COLUMN: &str = "CarName";
const COMPANY_COLUMN: &str = "car_company";
const BODY_COLUMN: &str = "carbody";
const WORD_COLUMNS: [&str; 2] = ["doornumber", "cylindernumber"];

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Expected column '{0}' missing after encoding")]
    MissingColumn(String),
}

impl PrepareError {
    /// True when the failure is the input file being absent or unreadable,
    /// as opposed to an internal-consistency problem.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, PrepareError::Load(LoaderError::DataUnavailable(_)))
    }
}

/// Map a count spelled as an English word to its integer value.
/// Unknown words are a missing value, not an error.
pub fn word_to_number(word: &str) -> Option<i64> {
    WORD_NUMBERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, n)| n)
}

/// Correct a manufacturer token against the alias table.
/// Unmatched tokens pass through unchanged.
pub fn canonical_company(token: &str) -> &str {
    COMPANY_ALIASES
        .iter()
        .find(|(from, _)| *from == token)
        .map(|&(_, to)| to)
        .unwrap_or(token)
}

/// The final, fully numeric feature table. Built once per session and
/// immutable thereafter; row order matches the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTable {
    pub carwidth: Vec<f64>,
    pub enginesize: Vec<f64>,
    pub horsepower: Vec<f64>,
    pub drivewheel_fwd: Vec<u8>,
    pub car_company_buick: Vec<u8>,
    pub price: Vec<f64>,
}

impl PreparedTable {
    pub fn len(&self) -> usize {
        self.price.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    /// Column values as f64, by final column name. Indicators widen to 0.0/1.0.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        match name {
            "carwidth" => Some(self.carwidth.clone()),
            "enginesize" => Some(self.enginesize.clone()),
            "horsepower" => Some(self.horsepower.clone()),
            "drivewheel_fwd" => Some(self.drivewheel_fwd.iter().map(|&v| f64::from(v)).collect()),
            "car_company_buick" => Some(
                self.car_company_buick
                    .iter()
                    .map(|&v| f64::from(v))
                    .collect(),
            ),
            "price" => Some(self.price.clone()),
            _ => None,
        }
    }

    /// The five model features for one row, in final column order.
    pub fn feature_row(&self, i: usize) -> [f64; 5] {
        [
            self.carwidth[i],
            self.enginesize[i],
            self.horsepower[i],
            f64::from(self.drivewheel_fwd[i]),
            f64::from(self.car_company_buick[i]),
        ]
    }
}

/// Runs the cleaning and encoding pipeline. Pure function of the file's
/// contents; no side effects beyond reading it.
pub struct DatasetPreparer;

impl DatasetPreparer {
    /// Prepare the feature table from a dataset file.
    pub fn prepare(path: &Path) -> Result<PreparedTable, PrepareError> {
        let df = DatasetLoader::load_csv(path)?;
        let mut df = Self::extract_company(df)?;
        for name in WORD_COLUMNS {
            Self::map_word_column(&mut df, name)?;
        }
        let df = Self::encode_categoricals(df)?;
        Self::project(&df)
    }

    /// Derive `car_company` as the first whitespace-delimited token of the
    /// car name, corrected through the alias table; drops the name column.
    fn extract_company(df: DataFrame) -> Result<DataFrame, PrepareError> {
        let companies: Vec<Option<String>> = {
            let names = df.column(NAME_COLUMN)?.as_materialized_series().str()?;
            names
                .into_iter()
                .map(|v| {
                    v.map(|name| {
                        let token = name.split_whitespace().next().unwrap_or("");
                        canonical_company(token).to_string()
                    })
                })
                .collect()
        };

        let mut df = df.drop(NAME_COLUMN)?;
        df.with_column(Column::new(COMPANY_COLUMN.into(), companies))?;
        Ok(df)
    }

    /// Replace a word-encoded count column with integers via the word map.
    /// Values outside the map become null. Columns already numeric are left
    /// untouched.
    fn map_word_column(df: &mut DataFrame, name: &str) -> Result<(), PrepareError> {
        let mapped: Vec<Option<i64>> = {
            let col = df.column(name)?;
            if !matches!(col.dtype(), DataType::String) {
                return Ok(());
            }
            col.as_materialized_series()
                .str()?
                .into_iter()
                .map(|v| v.and_then(word_to_number))
                .collect()
        };
        df.with_column(Column::new(name.into(), mapped))?;
        Ok(())
    }

    /// One-hot encode every remaining string column: one 0/1 indicator per
    /// distinct value, minus the first value in sorted order (the reference
    /// level). Indicators are named `<field>_<value>`, except for the car
    /// body column whose indicators carry the bare value name.
    fn encode_categoricals(df: DataFrame) -> Result<DataFrame, PrepareError> {
        let categorical: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|c| matches!(c.dtype(), DataType::String))
            .map(|c| c.name().to_string())
            .collect();

        let mut indicators: Vec<Column> = Vec::new();
        for name in &categorical {
            let series = df.column(name.as_str())?.as_materialized_series();
            let ca = series.str()?;

            let mut values: Vec<String> = ca.into_iter().flatten().map(str::to_string).collect();
            values.sort();
            values.dedup();

            for value in values.iter().skip(1) {
                let flags: Vec<i64> = ca
                    .into_iter()
                    .map(|v| i64::from(v == Some(value.as_str())))
                    .collect();
                let col_name = if name.as_str() == BODY_COLUMN {
                    value.clone()
                } else {
                    format!("{name}_{value}")
                };
                indicators.push(Column::new(col_name.into(), flags));
            }
        }

        let mut df = df;
        for name in &categorical {
            df = df.drop(name)?;
        }
        for col in indicators {
            df.with_column(col)?;
        }
        Ok(df)
    }

    /// Keep exactly the six final columns, converting to the fixed-shape
    /// table. A missing column means the fixed-column assumption no longer
    /// matches the data and is surfaced as an error.
    fn project(df: &DataFrame) -> Result<PreparedTable, PrepareError> {
        Ok(PreparedTable {
            carwidth: Self::numeric_column(df, "carwidth")?,
            enginesize: Self::numeric_column(df, "enginesize")?,
            horsepower: Self::numeric_column(df, "horsepower")?,
            drivewheel_fwd: Self::indicator_column(df, "drivewheel_fwd")?,
            car_company_buick: Self::indicator_column(df, "car_company_buick")?,
            price: Self::numeric_column(df, "price")?,
        })
    }

    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, PrepareError> {
        let col = df
            .column(name)
            .map_err(|_| PrepareError::MissingColumn(name.to_string()))?;
        let cast = col.cast(&DataType::Float64)?;
        let ca = cast.f64()?;
        Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    fn indicator_column(df: &DataFrame, name: &str) -> Result<Vec<u8>, PrepareError> {
        let col = df
            .column(name)
            .map_err(|_| PrepareError::MissingColumn(name.to_string()))?;
        let cast = col.cast(&DataType::Int64)?;
        let ca = cast.i64()?;
        Ok(ca
            .into_iter()
            .map(|v| u8::from(v.unwrap_or(0) != 0))
            .collect())
    }
}

/// Session-scoped memo for the prepared table, keyed by the input path.
/// The result (success or failure) is computed once and reused; the memo is
/// discarded only when the path changes or on explicit invalidation.
pub struct PreparedCache {
    path: PathBuf,
    memo: Option<Result<Arc<PreparedTable>, Arc<PrepareError>>>,
}

impl PreparedCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path, memo: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point the cache at a new input file, discarding the memo if the path
    /// actually changed.
    pub fn set_path(&mut self, path: PathBuf) {
        if path != self.path {
            self.path = path;
            self.memo = None;
        }
    }

    /// Force a re-run of the pipeline on next access.
    pub fn invalidate(&mut self) {
        self.memo = None;
    }

    /// The memoized result, if the pipeline has run this session.
    pub fn cached(&self) -> Option<&Result<Arc<PreparedTable>, Arc<PrepareError>>> {
        self.memo.as_ref()
    }

    /// Return the prepared table, running the pipeline on first access.
    pub fn get_or_prepare(&mut self) -> Result<Arc<PreparedTable>, Arc<PrepareError>> {
        if let Some(cached) = &self.memo {
            return cached.clone();
        }

        let result = DatasetPreparer::prepare(&self.path)
            .map(Arc::new)
            .map_err(Arc::new);
        match &result {
            Ok(table) => log::info!(
                "prepared {} rows from {}",
                table.len(),
                self.path.display()
            ),
            Err(e) => log::error!("dataset preparation failed: {e}"),
        }
        self.memo = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FIXTURE_HEADER: &str =
        "CarName,fueltype,carbody,drivewheel,doornumber,cylindernumber,carwidth,enginesize,horsepower,price\n";

    fn write_fixture(name: &str, rows: &[&str]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("carprice_{}_{}.csv", name, std::process::id()));
        let mut contents = String::from(FIXTURE_HEADER);
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn word_map_covers_the_fixed_set() {
        assert_eq!(word_to_number("two"), Some(2));
        assert_eq!(word_to_number("four"), Some(4));
        assert_eq!(word_to_number("twelve"), Some(12));
    }

    #[test]
    fn unknown_word_is_a_missing_value() {
        assert_eq!(word_to_number("seven"), None);
        assert_eq!(word_to_number(""), None);
    }

    #[test]
    fn alias_substitution_is_exact_match() {
        assert_eq!(canonical_company("vw"), "volkswagen");
        assert_eq!(canonical_company("toyouta"), "toyota");
        assert_eq!(canonical_company("Nissan"), "nissan");
        // Already-correct names pass through unchanged.
        assert_eq!(canonical_company("nissan"), "nissan");
        assert_eq!(canonical_company("buick"), "buick");
        // Case matters: only the exact variants in the table are corrected.
        assert_eq!(canonical_company("VW"), "VW");
    }

    #[test]
    fn carbody_indicators_are_unprefixed() {
        let df = DataFrame::new(vec![
            Column::new("carbody".into(), vec!["convertible", "sedan", "wagon"]),
            Column::new("drivewheel".into(), vec!["4wd", "fwd", "rwd"]),
        ])
        .unwrap();

        let encoded = DatasetPreparer::encode_categoricals(df).unwrap();
        let names: Vec<String> = encoded
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        // First sorted value of each column is the dropped reference level.
        assert!(names.contains(&"sedan".to_string()));
        assert!(names.contains(&"wagon".to_string()));
        assert!(!names.contains(&"convertible".to_string()));
        assert!(names.contains(&"drivewheel_fwd".to_string()));
        assert!(names.contains(&"drivewheel_rwd".to_string()));
        assert!(!names.contains(&"drivewheel_4wd".to_string()));
    }

    #[test]
    fn prepare_end_to_end() {
        // Third row supplies the reference levels (4wd, alfa-romero) so the
        // fwd and buick indicators survive the drop-first encoding.
        let path = write_fixture(
            "e2e",
            &[
                "toyota corolla,gas,sedan,fwd,four,four,64.0,110,56,7000",
                "buick century,gas,sedan,rwd,four,six,66.5,200,120,16500",
                "alfa-romero giulia,gas,convertible,4wd,two,four,64.1,130,111,13495",
            ],
        );

        let table = DatasetPreparer::prepare(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(table.len(), 3);
        assert_eq!(table.drivewheel_fwd, vec![1, 0, 0]);
        assert_eq!(table.car_company_buick, vec![0, 1, 0]);
        assert_eq!(table.carwidth, vec![64.0, 66.5, 64.1]);
        assert_eq!(table.enginesize, vec![110.0, 200.0, 130.0]);
        assert_eq!(table.horsepower, vec![56.0, 120.0, 111.0]);
        assert_eq!(table.price, vec![7000.0, 16500.0, 13495.0]);

        // Indicators are strictly binary.
        assert!(table.drivewheel_fwd.iter().all(|&v| v <= 1));
        assert!(table.car_company_buick.iter().all(|&v| v <= 1));
    }

    #[test]
    fn misspelled_manufacturers_are_corrected() {
        let path = write_fixture(
            "alias",
            &[
                "vw golf,gas,sedan,fwd,four,four,64.0,110,56,7000",
                "vokswagen rabbit,gas,sedan,rwd,four,four,64.0,110,56,7500",
                "volkswagen dasher,gas,wagon,4wd,four,four,64.0,110,56,8000",
            ],
        );

        let table = DatasetPreparer::prepare(&path);
        fs::remove_file(&path).ok();

        // All three rows collapse to the same manufacturer, so car_company
        // produces no indicator columns at all and the buick column is
        // reported missing.
        match table {
            Err(PrepareError::MissingColumn(col)) => assert_eq!(col, "car_company_buick"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_data_unavailable() {
        let err = DatasetPreparer::prepare(Path::new("no-such-dataset.csv")).unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn unrecognized_word_count_becomes_null_not_error() {
        // "seven" is outside the word map; the row must still prepare since
        // cylinder counts are dropped at projection.
        let path = write_fixture(
            "words",
            &[
                "toyota corolla,gas,sedan,fwd,four,seven,64.0,110,56,7000",
                "buick century,gas,sedan,rwd,four,six,66.5,200,120,16500",
                "alfa-romero giulia,gas,convertible,4wd,two,four,64.1,130,111,13495",
            ],
        );

        let table = DatasetPreparer::prepare(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn cache_memoizes_and_invalidates_on_path_change() {
        let path = write_fixture(
            "cache",
            &[
                "toyota corolla,gas,sedan,fwd,four,four,64.0,110,56,7000",
                "buick century,gas,sedan,rwd,four,six,66.5,200,120,16500",
                "alfa-romero giulia,gas,convertible,4wd,two,four,64.1,130,111,13495",
            ],
        );

        let mut cache = PreparedCache::new(path.clone());
        assert!(cache.cached().is_none());

        let first = cache.get_or_prepare().unwrap();
        let second = cache.get_or_prepare().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Deleting the file does not disturb the memo.
        fs::remove_file(&path).ok();
        assert!(cache.get_or_prepare().is_ok());

        // A changed path drops the memo; the new path has no file behind it.
        cache.set_path(PathBuf::from("elsewhere.csv"));
        assert!(cache.cached().is_none());
        assert!(cache.get_or_prepare().is_err());
    }
}
