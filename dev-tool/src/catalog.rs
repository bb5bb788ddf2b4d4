use std::{collections::HashMap, io::Read, path::Path};

use anyhow::{Context, Error};
use displaydoc::Display;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use shelf_planner::CategoryClassifier;

#[derive(Debug, Display, Error, PartialEq)]
pub enum CatalogError {
    /// Product {0:?} is not listed in the catalog
    UnknownProduct(String),
    /// Product {product:?} is listed with the categories {first:?} and {second:?}
    ConflictingCategory {
        product: String,
        first: String,
        second: String,
    },
    /// The catalog doesn't list any product
    Empty,
}

#[derive(Deserialize)]
struct CatalogRecord {
    product: String,
    category: String,
}

/// Classifies products by looking them up in a catalog of `product,category` rows.
///
/// The lookup ignores the case and surrounding whitespace of the product names.
#[derive(Debug)]
pub struct CatalogClassifier {
    categories: HashMap<String, String>,
}

impl CatalogClassifier {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Opening the catalog {} failed", path.display()))?;

        Self::from_csv(reader)
            .with_context(|| format!("Reading the catalog {} failed", path.display()))
    }

    #[cfg(test)]
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        Self::from_csv(
            csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader),
        )
    }

    fn from_csv(mut reader: csv::Reader<impl Read>) -> Result<Self, Error> {
        let mut categories = HashMap::<String, String>::new();

        for record in reader.deserialize() {
            let CatalogRecord { product, category } = record?;
            let key = product.to_lowercase();
            match categories.get(&key) {
                Some(first) if first != &category => {
                    return Err(CatalogError::ConflictingCategory {
                        product,
                        first: first.clone(),
                        second: category,
                    }
                    .into());
                }
                Some(_) => {}
                None => {
                    categories.insert(key, category);
                }
            }
        }

        if categories.is_empty() {
            return Err(CatalogError::Empty.into());
        }
        debug!("Loaded a catalog of {} products.", categories.len());

        Ok(Self { categories })
    }
}

impl CategoryClassifier for CatalogClassifier {
    fn predict(&self, product: &str) -> Result<String, Error> {
        self.categories
            .get(&product.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::UnknownProduct(product.to_string()).into())
    }
}
