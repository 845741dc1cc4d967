//! Charts module - static chart export

mod export;

pub use export::{ChartError, ChartExporter};
