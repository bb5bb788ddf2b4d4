use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{data::Rule, utils::nan_safe_f64_cmp_desc};

/// The accumulated lift of a category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

/// The scores of all categories which take part in a positive rule.
///
/// Categories are kept in the order of their first appearance in the rules, antecedent members
/// before consequent members. Categories without a rule have no score at all.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryScores(Vec<CategoryScore>);

impl CategoryScores {
    /// Sums up the lift of every rule for each category it mentions.
    pub fn from_rules(rules: &[Rule]) -> Self {
        let (scores, _) = rules
            .iter()
            .flat_map(|rule| rule.categories().map(move |category| (category, rule.lift)))
            .fold(
                (Vec::<CategoryScore>::new(), HashMap::<&str, usize>::new()),
                |(mut scores, mut positions), (category, lift)| {
                    match positions.get(category) {
                        Some(&position) => scores[position].score += lift,
                        None => {
                            positions.insert(category, scores.len());
                            scores.push(CategoryScore {
                                category: category.to_string(),
                                score: lift,
                            });
                        }
                    }
                    (scores, positions)
                },
            );

        Self(scores)
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|score| score.category == category)
            .map(|score| score.score)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.0.iter()
    }

    /// The categories by descending score, ties keep their order of first appearance.
    pub fn ranked(&self) -> Vec<&CategoryScore> {
        let mut ranked = self.0.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| nan_safe_f64_cmp_desc(&a.score, &b.score));
        ranked
    }
}

/// A category related to an antecedent category by a rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub category: String,
    pub lift: f64,
    pub confidence: f64,
}

/// The consequent categories of each antecedent category.
pub type CategoryRelations = BTreeMap<String, Vec<Relation>>;

/// Builds the relation graph of the rules.
pub fn category_relations(rules: &[Rule]) -> CategoryRelations {
    let mut relations = CategoryRelations::new();
    for rule in rules {
        for antecedent in rule.antecedent.iter() {
            relations
                .entry(antecedent.clone())
                .or_default()
                .extend(rule.consequent.iter().map(|consequent| Relation {
                    category: consequent.clone(),
                    lift: rule.lift,
                    confidence: rule.confidence,
                }));
        }
    }
    relations
}
