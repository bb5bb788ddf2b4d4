use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::debug;

#[cfg(feature = "multithreaded")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    encoder::PresenceMatrix,
    mining::{config::Config, AnalysisError},
};

/// A set of categories, as sorted column ids of the presence matrix, whose support meets the
/// threshold.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrequentItemset {
    pub(crate) items: Vec<usize>,
    pub(crate) support: f64,
}

/// The frequent itemsets of all sizes at the support threshold which was actually used.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrequentItemsets {
    pub(crate) min_support: f64,
    /// Ordered by size, then lexicographically by column ids.
    pub(crate) itemsets: Vec<FrequentItemset>,
}

impl FrequentItemsets {
    /// Support lookup keyed by the column ids.
    pub(crate) fn supports(&self) -> HashMap<&[usize], f64> {
        self.itemsets
            .iter()
            .map(|itemset| (itemset.items.as_slice(), itemset.support))
            .collect()
    }
}

/// The support thresholds of the adaptive search, in the order they are tried.
///
/// The initial threshold is followed by `2/N` and `1/N` if there are at least two transactions.
pub(crate) fn support_thresholds(min_support: f64, transactions: usize) -> Vec<f64> {
    let mut thresholds = vec![min_support];
    if transactions >= 2 {
        let transactions = transactions as f64;
        thresholds.push(2. / transactions);
        thresholds.push(1. / transactions);
    }
    thresholds
}

/// Mines the frequent itemsets with the first support threshold that yields any.
///
/// # Errors
/// Fails if none of the thresholds yields a frequent itemset.
pub(crate) fn mine_adaptive(
    matrix: &PresenceMatrix,
    config: &Config,
) -> Result<FrequentItemsets, AnalysisError> {
    let thresholds = support_thresholds(config.min_support(), matrix.transactions());

    for &min_support in &thresholds {
        let itemsets = mine(matrix, min_support, config.max_itemset_len());
        debug!(
            "Found {} frequent itemsets at support threshold {}.",
            itemsets.len(),
            min_support,
        );
        if !itemsets.is_empty() {
            return Ok(FrequentItemsets {
                min_support,
                itemsets,
            });
        }
    }

    Err(AnalysisError::NoFrequentItemsets {
        tried: thresholds,
        transactions: matrix.transactions(),
    })
}

/// Level-wise enumeration of all itemsets with a support of at least `min_support`.
pub(crate) fn mine(
    matrix: &PresenceMatrix,
    min_support: f64,
    max_len: Option<usize>,
) -> Vec<FrequentItemset> {
    let frequent = |items: Vec<usize>| {
        let support = matrix.support(&items);
        (support >= min_support).then(|| FrequentItemset { items, support })
    };

    let mut level = (0..matrix.categories().len())
        .map(|column| vec![column])
        .filter_map(frequent)
        .collect::<Vec<_>>();
    let mut itemsets = Vec::new();
    let mut len = 1;

    while !level.is_empty() {
        let next = if max_len.map_or(true, |max_len| len < max_len) {
            #[cfg(not(feature = "multithreaded"))]
            let candidates = candidates(&level).into_iter();
            #[cfg(feature = "multithreaded")]
            let candidates = candidates(&level).into_par_iter();

            candidates.filter_map(frequent).collect()
        } else {
            Vec::new()
        };
        itemsets.extend(level);
        level = next;
        len += 1;
    }

    itemsets
}

/// Joins the itemsets of one level which share all but their last item into the candidates of
/// the next level.
///
/// Candidates with an infrequent subset are pruned, because their support can't be higher than
/// the support of any of their subsets.
fn candidates(level: &[FrequentItemset]) -> Vec<Vec<usize>> {
    let known = level
        .iter()
        .map(|itemset| itemset.items.as_slice())
        .collect::<HashSet<_>>();

    level
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let (_, prefix) = a.items.split_last()?;
            let (last, other_prefix) = b.items.split_last()?;
            if prefix != other_prefix {
                return None;
            }

            let mut items = a.items.clone();
            items.push(*last);
            (0..items.len())
                .all(|skip| {
                    let subset = items
                        .iter()
                        .enumerate()
                        .filter(|(idx, _)| *idx != skip)
                        .map(|(_, item)| *item)
                        .collect::<Vec<_>>();
                    known.contains(subset.as_slice())
                })
                .then(|| items)
        })
        .collect()
}
