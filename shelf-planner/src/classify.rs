use log::warn;
use serde::{Deserialize, Serialize};

use crate::{data::Transaction, error::Error};

#[cfg(test)]
use mockall::automock;

/// Maps a product name to its category.
#[cfg_attr(test, automock)]
pub trait CategoryClassifier {
    fn predict(&self, product: &str) -> Result<String, Error>;
}

/// Every product is its own category.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityClassifier;

impl CategoryClassifier for IdentityClassifier {
    fn predict(&self, product: &str) -> Result<String, Error> {
        Ok(product.to_string())
    }
}

/// The predicted category of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub product: String,
    pub category: String,
}

/// A receipt whose products were classified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorizedReceipt {
    pub id: String,
    pub predictions: Vec<Prediction>,
    pub transaction: Transaction,
}

/// A receipt whose classification failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedReceipt {
    pub id: String,
    pub error: String,
}

/// The classified receipts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Categorization {
    pub receipts: Vec<CategorizedReceipt>,
    pub failed: Vec<FailedReceipt>,
}

impl Categorization {
    /// The transactions of all successfully classified receipts.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.receipts
            .iter()
            .map(|receipt| receipt.transaction.clone())
            .collect()
    }
}

/// Classifies the products of each receipt.
///
/// Receipts are labeled `receipt_01`, `receipt_02`, ... by their position in the input. Product
/// names are trimmed and empty names are ignored, receipts without any product are skipped. A
/// receipt with a failed prediction is excluded from the transactions and reported instead.
pub fn categorize_receipts<R, P>(
    receipts: impl IntoIterator<Item = R>,
    classifier: &dyn CategoryClassifier,
) -> Categorization
where
    R: IntoIterator<Item = P>,
    P: AsRef<str>,
{
    let mut categorization = Categorization::default();

    for (idx, receipt) in receipts.into_iter().enumerate() {
        let id = format!("receipt_{:02}", idx + 1);
        let products = receipt
            .into_iter()
            .filter_map(|product| {
                let product = product.as_ref().trim();
                (!product.is_empty()).then(|| product.to_string())
            })
            .collect::<Vec<_>>();
        if products.is_empty() {
            continue;
        }

        let predictions = products
            .into_iter()
            .map(|product| {
                classifier
                    .predict(&product)
                    .map(|category| Prediction { product, category })
            })
            .collect::<Result<Vec<_>, _>>();

        match predictions {
            Ok(predictions) => {
                let transaction = predictions
                    .iter()
                    .map(|prediction| prediction.category.as_str())
                    .collect();
                categorization.receipts.push(CategorizedReceipt {
                    id,
                    predictions,
                    transaction,
                });
            }
            Err(error) => {
                warn!("Failed to classify the products of {}: {}", id, error);
                categorization.failed.push(FailedReceipt {
                    id,
                    error: error.to_string(),
                });
            }
        }
    }

    categorization
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use mockall::predicate::eq;

    use super::*;

    #[test]
    fn test_identity_classifier() {
        let categorization = categorize_receipts(
            vec![vec![" milk ", "bread", "milk"], vec!["eggs"]],
            &IdentityClassifier,
        );

        assert!(categorization.failed.is_empty());
        assert_eq!(categorization.receipts.len(), 2);
        assert_eq!(categorization.receipts[0].id, "receipt_01");
        assert_eq!(categorization.receipts[0].predictions.len(), 3);
        assert_eq!(
            categorization.transactions(),
            [
                Transaction::new(vec!["bread", "milk"]),
                Transaction::new(vec!["eggs"]),
            ],
        );
    }

    #[test]
    fn test_empty_receipts_are_skipped() {
        let categorization = categorize_receipts(
            vec![vec!["", "  "], vec![], vec!["eggs"]],
            &IdentityClassifier,
        );

        assert_eq!(categorization.receipts.len(), 1);
        assert_eq!(categorization.receipts[0].id, "receipt_03");
    }

    #[test]
    fn test_failed_receipts_are_reported() {
        let mut classifier = MockCategoryClassifier::new();
        classifier
            .expect_predict()
            .with(eq("whole milk"))
            .returning(|_| Ok("dairy".into()));
        classifier
            .expect_predict()
            .with(eq("mystery"))
            .returning(|_| bail!("unknown product"));

        let categorization = categorize_receipts(
            vec![vec!["whole milk"], vec!["whole milk", "mystery"]],
            &classifier,
        );

        assert_eq!(categorization.transactions(), [Transaction::new(vec!["dairy"])]);
        assert_eq!(
            categorization.failed,
            [FailedReceipt {
                id: "receipt_02".into(),
                error: "unknown product".into(),
            }],
        );
    }
}
