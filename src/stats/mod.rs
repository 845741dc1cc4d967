//! Stats module - column summaries and the price model

mod regression;
mod summary;

pub use regression::{pearson, trend_line, ModelError, PriceModel, SIGNIFICANCE_THRESHOLD};
pub use summary::{summarize_table, ColumnSummary};
