use displaydoc::Display;
use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::{
    data::Rule,
    encoder::PresenceMatrix,
    mining::apriori::FrequentItemsets,
};

/// Numerical failures of the rule generation.
///
/// They can't happen for itemsets which obey the support invariants, a rule which runs into one
/// is skipped instead of failing the whole analysis.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum RuleError {
    /// The support of {itemset:?} is unknown, skipped rule {antecedent:?} => {consequent:?}
    UnknownSupport {
        itemset: Vec<String>,
        antecedent: Vec<String>,
        consequent: Vec<String>,
    },
    /// The support of {itemset:?} is zero, skipped rule {antecedent:?} => {consequent:?}
    ZeroSupport {
        itemset: Vec<String>,
        antecedent: Vec<String>,
        consequent: Vec<String>,
    },
}

/// An association rule over column ids of the presence matrix.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IndexedRule {
    pub(crate) antecedent: Vec<usize>,
    pub(crate) consequent: Vec<usize>,
    pub(crate) support: f64,
    pub(crate) confidence: f64,
    pub(crate) lift: f64,
}

impl IndexedRule {
    /// Resolves the column ids to the categories of the matrix.
    pub(crate) fn to_rule(&self, matrix: &PresenceMatrix) -> Rule {
        Rule {
            antecedent: names(&self.antecedent, matrix).into(),
            consequent: names(&self.consequent, matrix).into(),
            support: self.support,
            confidence: self.confidence,
            lift: self.lift,
        }
    }
}

fn names(items: &[usize], matrix: &PresenceMatrix) -> Vec<String> {
    items
        .iter()
        .map(|&column| matrix.category(column).to_string())
        .collect()
}

/// Generates every rule of every frequent itemset with at least two items.
///
/// Each non-empty proper subset of an itemset becomes the antecedent of one rule, largest
/// antecedents first. No threshold is applied here, rules with a lift of at most one are still
/// part of the output. Rules which fail numerically are returned separately.
pub(crate) fn generate_rules(
    itemsets: &FrequentItemsets,
    matrix: &PresenceMatrix,
) -> (Vec<IndexedRule>, Vec<RuleError>) {
    let supports = itemsets.supports();
    let support_of = |items: &[usize]| supports.get(items).copied();

    let mut rules = Vec::new();
    let mut errors = Vec::new();
    for itemset in itemsets
        .itemsets
        .iter()
        .filter(|itemset| itemset.items.len() >= 2)
    {
        for len in (1..itemset.items.len()).rev() {
            for antecedent in itemset.items.iter().copied().combinations(len) {
                let consequent = itemset
                    .items
                    .iter()
                    .copied()
                    .filter(|item| !antecedent.contains(item))
                    .collect::<Vec<_>>();

                let error = |itemset: &[usize], zero: bool| {
                    let (itemset, antecedent, consequent) = (
                        names(itemset, matrix),
                        names(&antecedent, matrix),
                        names(&consequent, matrix),
                    );
                    if zero {
                        RuleError::ZeroSupport {
                            itemset,
                            antecedent,
                            consequent,
                        }
                    } else {
                        RuleError::UnknownSupport {
                            itemset,
                            antecedent,
                            consequent,
                        }
                    }
                };
                let rule = match (support_of(&antecedent), support_of(&consequent)) {
                    (Some(antecedent_support), Some(consequent_support))
                        if antecedent_support > 0. && consequent_support > 0. =>
                    {
                        let confidence = itemset.support / antecedent_support;
                        Ok(IndexedRule {
                            support: itemset.support,
                            confidence,
                            lift: confidence / consequent_support,
                            antecedent: antecedent.clone(),
                            consequent: consequent.clone(),
                        })
                    }
                    (Some(antecedent_support), Some(_)) if antecedent_support <= 0. => {
                        Err(error(&antecedent, true))
                    }
                    (Some(_), Some(_)) => Err(error(&consequent, true)),
                    (None, _) => Err(error(&antecedent, false)),
                    (_, None) => Err(error(&consequent, false)),
                };

                match rule {
                    Ok(rule) => rules.push(rule),
                    Err(error) => {
                        warn!("{}", error);
                        errors.push(error);
                    }
                }
            }
        }
    }

    (rules, errors)
}

/// Converts the rules to rules over categories.
pub(crate) fn to_rules(rules: &[IndexedRule], matrix: &PresenceMatrix) -> Vec<Rule> {
    rules.iter().map(|rule| rule.to_rule(matrix)).collect()
}
