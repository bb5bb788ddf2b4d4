//! Sample data of a small grocery store.

use std::{io::Result, path::PathBuf};

use crate::asset::resolve_data;

/// Resolves the path to the sample receipts, one receipt of item names per row.
pub fn receipts() -> Result<PathBuf> {
    resolve_data("receipts.csv")
}

/// Resolves the path to the sample item catalog, which maps item names to categories.
pub fn catalog() -> Result<PathBuf> {
    resolve_data("catalog.csv")
}

/// Resolves the path to the sample shelf layout.
pub fn shelves() -> Result<PathBuf> {
    resolve_data("shelves.json")
}
