use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Error};
use itertools::Itertools;
use log::{info, warn};
use serde::Serialize;
use structopt::StructOpt;

use shelf_planner::{
    categorize_receipts,
    Categorization,
    Config,
    IdentityClassifier,
    Transaction,
};

use crate::catalog::CatalogClassifier;

/// The arguments shared by all planner commands.
#[derive(StructOpt, Debug)]
pub struct PlannerArgs {
    /// A CSV file with the product names of one receipt per row.
    pub receipts: PathBuf,

    /// A CSV file with `product,category` rows. Without it every product is its own category.
    #[structopt(long)]
    pub catalog: Option<PathBuf>,

    /// The initial minimum support of the frequent itemsets.
    #[structopt(long, default_value = "0.1")]
    pub min_support: f64,

    /// The number of rules to report in the summary.
    #[structopt(long, default_value = "10")]
    pub top_rules: usize,

    /// The maximum number of categories in a frequent itemset.
    #[structopt(long)]
    pub max_itemset_len: Option<usize>,

    #[structopt(long)]
    pub pretty: bool,
}

impl PlannerArgs {
    pub fn config(&self) -> Result<Config, Error> {
        let config = Config::default()
            .with_min_support(self.min_support)?
            .with_top_rules(self.top_rules)?
            .with_max_itemset_len(self.max_itemset_len)?;

        Ok(config)
    }

    /// Reads and classifies the receipts.
    pub fn categorize(&self) -> Result<Categorization, Error> {
        let receipts = read_receipts(&self.receipts)?;
        let categorization = if let Some(catalog) = &self.catalog {
            categorize_receipts(receipts, &CatalogClassifier::from_path(catalog)?)
        } else {
            categorize_receipts(receipts, &IdentityClassifier)
        };
        info!(
            "Categorized {} receipts, {} failed.",
            categorization.receipts.len(),
            categorization.failed.len(),
        );

        Ok(categorization)
    }

    pub fn print(&self, result: &impl Serialize) -> Result<(), Error> {
        let serialized = if self.pretty {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };

        println!("{}", serialized);

        Ok(())
    }
}

/// Reads the product names of the receipts, one receipt per row.
///
/// Empty names and rows are skipped.
pub fn read_receipts(path: &Path) -> Result<Vec<Vec<String>>, Error> {
    let bytes = fs::read(path)
        .with_context(|| format!("Reading the receipts {} failed", path.display()))?;

    parse_receipts(&bytes)
}

fn parse_receipts(bytes: &[u8]) -> Result<Vec<Vec<String>>, Error> {
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        warn!(
            "The receipts are not valid UTF-8, invalid bytes were replaced by {:?}.",
            char::REPLACEMENT_CHARACTER,
        );
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let mut receipts = Vec::new();
    for record in reader.records() {
        let products = record?
            .iter()
            .filter(|product| !product.is_empty())
            .map(ToString::to_string)
            .collect_vec();
        if !products.is_empty() {
            receipts.push(products);
        }
    }

    if receipts.is_empty() {
        bail!("The receipts don't contain any product");
    }

    Ok(receipts)
}

/// The transactions of the classified receipts.
///
/// A single transaction is duplicated, because the analysis needs at least two of them.
pub fn transactions(categorization: &Categorization) -> Result<Vec<Transaction>, Error> {
    let mut transactions = categorization.transactions();
    match transactions.len() {
        0 => bail!("None of the receipts could be classified"),
        1 => {
            warn!("Only a single receipt could be classified, it is duplicated for the analysis.");
            transactions.push(transactions[0].clone());
        }
        _ => {}
    }

    Ok(transactions)
}
