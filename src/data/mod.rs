//! Data module - dataset loading and preparation

mod loader;
mod preparer;

pub use preparer::{
    canonical_company, PrepareError, PreparedCache, PreparedTable, FINAL_COLUMNS,
};
