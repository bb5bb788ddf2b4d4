use std::collections::{BTreeSet, HashMap};

use ndarray::{Array2, ArrayView1, Axis};

use crate::data::Transaction;

/// Boolean presence matrix of categories per transaction.
///
/// Rows are transactions in the order they were supplied, columns are the
/// categories of the universe in lexicographic order.
#[derive(Clone, Debug, PartialEq)]
pub struct PresenceMatrix {
    categories: Vec<String>,
    presence: Array2<bool>,
}

impl PresenceMatrix {
    /// Encodes the transactions into a presence matrix.
    ///
    /// Transactions are expected to be non-empty, this is not validated here.
    pub fn encode(transactions: &[Transaction]) -> Self {
        let categories = transactions
            .iter()
            .flat_map(|transaction| transaction.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let columns = categories
            .iter()
            .enumerate()
            .map(|(column, category)| (category.as_str(), column))
            .collect::<HashMap<_, _>>();

        let mut presence = Array2::from_elem((transactions.len(), categories.len()), false);
        for (row, transaction) in transactions.iter().enumerate() {
            for category in transaction.iter() {
                presence[[row, columns[category.as_str()]]] = true;
            }
        }

        Self {
            categories,
            presence,
        }
    }

    /// The category universe, indexed by column.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The category of the column.
    pub fn category(&self, column: usize) -> &str {
        &self.categories[column]
    }

    pub fn transactions(&self) -> usize {
        self.presence.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// The presence row of a transaction.
    pub fn row(&self, row: usize) -> ArrayView1<'_, bool> {
        self.presence.index_axis(Axis(0), row)
    }

    /// Counts the transactions which contain all categories of the columns.
    ///
    /// A transaction with further categories counts as well.
    pub fn count(&self, columns: &[usize]) -> usize {
        self.presence
            .rows()
            .into_iter()
            .filter(|row| columns.iter().all(|&column| row[column]))
            .count()
    }

    /// The fraction of transactions which contain all categories of the columns.
    pub fn support(&self, columns: &[usize]) -> f64 {
        match self.transactions() {
            0 => 0.,
            transactions => self.count(columns) as f64 / transactions as f64,
        }
    }
}
