use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

/// A non-empty set of categories, ordered like the category universe.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deref, From, Serialize, Deserialize)]
pub struct Itemset(Vec<String>);

impl Itemset {
    /// Checks if the category is a member of this itemset.
    pub fn contains(&self, category: &str) -> bool {
        self.0.iter().any(|member| member == category)
    }
}

/// A directional association rule `antecedent => consequent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support of the union of antecedent and consequent.
    pub support: f64,
    /// `support(antecedent ∪ consequent) / support(antecedent)`.
    pub confidence: f64,
    /// `confidence / support(consequent)`.
    pub lift: f64,
}

impl Rule {
    /// All categories mentioned by the rule, antecedent first.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.antecedent
            .iter()
            .chain(self.consequent.iter())
            .map(String::as_str)
    }

    /// Checks if the rule indicates a positive association.
    pub fn is_positive(&self) -> bool {
        self.lift > 1.
    }
}
