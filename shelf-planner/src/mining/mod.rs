pub(crate) mod apriori;
pub(crate) mod canonical;
pub(crate) mod config;
pub(crate) mod rules;

use displaydoc::Display;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::{
    config::{Config, Error as ConfigError},
    rules::RuleError,
};
use crate::{
    data::{Rule, Transaction},
    encoder::PresenceMatrix,
    mining::{
        apriori::mine_adaptive,
        canonical::canonicalize,
        rules::{generate_rules, to_rules},
    },
    planner::systems::AssociationSystem,
};

/// Outcomes of an association analysis which don't yield any positive rule.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum AnalysisError {
    /// Not enough transactions for an association analysis, got {transactions} but at least 2 are required
    InsufficientData { transactions: usize },
    /// No frequent categories among {transactions} transactions at any of the support thresholds {tried:?}
    NoFrequentItemsets { tried: Vec<f64>, transactions: usize },
    /// No association rules among {transactions} transactions at the support threshold {min_support}
    NoRulesAtThreshold { min_support: f64, transactions: usize },
    /// No positive association (lift > 1) among {transactions} transactions at the support threshold {min_support}
    NoPositiveAssociation { min_support: f64, transactions: usize },
}

impl AnalysisError {
    /// The number of analyzed transactions.
    pub fn transactions(&self) -> usize {
        match self {
            Self::InsufficientData { transactions }
            | Self::NoFrequentItemsets { transactions, .. }
            | Self::NoRulesAtThreshold { transactions, .. }
            | Self::NoPositiveAssociation { transactions, .. } => *transactions,
        }
    }

    /// The support threshold which was used, if the mining got that far.
    pub fn min_support(&self) -> Option<f64> {
        match self {
            Self::InsufficientData { .. } | Self::NoFrequentItemsets { .. } => None,
            Self::NoRulesAtThreshold { min_support, .. }
            | Self::NoPositiveAssociation { min_support, .. } => Some(*min_support),
        }
    }
}

/// The positive association rules of a set of transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssociationAnalysis {
    pub total_transactions: usize,
    /// The support threshold of the adaptive search which yielded the frequent itemsets.
    pub min_support: f64,
    /// All canonical rules, sorted by descending lift.
    pub rules: Vec<Rule>,
    /// The strongest canonical rules for display.
    pub top_rules: Vec<Rule>,
    /// Rules which were skipped due to numerical failures.
    #[serde(skip)]
    pub skipped_rules: Vec<RuleError>,
}

impl AssociationAnalysis {
    /// The number of canonical positive rules.
    pub fn total_rules(&self) -> usize {
        self.rules.len()
    }
}

/// Mines the canonical positive association rules of the transactions.
///
/// Transactions are expected to be non-empty, an empty one still counts towards the total.
pub(crate) fn analyze(
    transactions: &[Transaction],
    config: &Config,
) -> Result<AssociationAnalysis, AnalysisError> {
    let total_transactions = transactions.len();
    if total_transactions < 2 {
        return Err(AnalysisError::InsufficientData {
            transactions: total_transactions,
        });
    }

    let matrix = PresenceMatrix::encode(transactions);
    debug!(
        "Encoded {} transactions over {} categories.",
        total_transactions,
        matrix.categories().len(),
    );
    let itemsets = mine_adaptive(&matrix, config)?;
    let min_support = itemsets.min_support;

    let (rules, skipped_rules) = generate_rules(&itemsets, &matrix);
    debug!(
        "Generated {} rules, skipped {}.",
        rules.len(),
        skipped_rules.len(),
    );
    if rules.is_empty() {
        return Err(AnalysisError::NoRulesAtThreshold {
            min_support,
            transactions: total_transactions,
        });
    }

    let canonical = canonicalize(rules);
    if canonical.is_empty() {
        return Err(AnalysisError::NoPositiveAssociation {
            min_support,
            transactions: total_transactions,
        });
    }

    let rules = to_rules(&canonical, &matrix);
    let top_rules = rules.iter().take(config.top_rules()).cloned().collect();
    info!(
        "Found {} positive rules among {} transactions at support threshold {}.",
        rules.len(),
        total_transactions,
        min_support,
    );

    Ok(AssociationAnalysis {
        total_transactions,
        min_support,
        rules,
        top_rules,
        skipped_rules,
    })
}

/// The association analysis system.
#[derive(Clone, Debug, Default)]
pub struct Association {
    config: Config,
}

impl Association {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl AssociationSystem for Association {
    fn analyze(&self, transactions: &[Transaction]) -> Result<AssociationAnalysis, AnalysisError> {
        analyze(transactions, &self.config)
    }
}
