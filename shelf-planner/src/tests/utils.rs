use crate::{
    data::{Itemset, Rule, Transaction},
    layout::{Shelf, ShelfLayout},
};

pub(crate) fn transactions(rows: &[&[&str]]) -> Vec<Transaction> {
    rows.iter()
        .map(|row| Transaction::new(row.iter().copied()))
        .collect()
}

pub(crate) fn itemset(categories: &[&str]) -> Itemset {
    categories
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .into()
}

/// A rule with the support of the whole transactions.
pub(crate) fn rule(
    antecedent: &[&str],
    consequent: &[&str],
    confidence: f64,
    lift: f64,
) -> Rule {
    Rule {
        antecedent: itemset(antecedent),
        consequent: itemset(consequent),
        support: 1.,
        confidence,
        lift,
    }
}

/// Shelves on the corners of the unit square, `A1 (0, 0)`, `A2 (1, 0)`, `B2 (1, 1)` and
/// `B1 (0, 1)`.
pub(crate) fn unit_square() -> ShelfLayout {
    ShelfLayout::new(vec![
        Shelf::new("A1", 0., 0.),
        Shelf::new("A2", 1., 0.),
        Shelf::new("B2", 1., 1.),
        Shelf::new("B1", 0., 1.),
    ])
    .unwrap()
}

/// Shelves `s0`, `s1`, ... along the x axis.
pub(crate) fn line(xs: &[f64]) -> ShelfLayout {
    ShelfLayout::new(
        xs.iter()
            .enumerate()
            .map(|(idx, &x)| Shelf::new(format!("s{}", idx), x, 0.))
            .collect(),
    )
    .unwrap()
}
