use std::{collections::BTreeSet, iter::FromIterator};

use derive_more::{Deref, From, Into};
use serde::{Deserialize, Serialize};

/// The categories observed together in one purchase.
///
/// Duplicate categories collapse into a single presence. The set is ordered,
/// which keeps the derived category universe deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, From, Into, Serialize, Deserialize)]
pub struct Transaction(BTreeSet<String>);

impl Transaction {
    /// Creates a transaction from the category labels of one purchase.
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        categories.into_iter().collect()
    }
}

impl<S> FromIterator<S> for Transaction
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let transaction = Transaction::new(vec!["milk", "bread", "milk"]);
        assert_eq!(transaction.len(), 2);
        assert_eq!(
            transaction.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["bread", "milk"],
        );
    }
}
