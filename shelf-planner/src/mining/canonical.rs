use std::collections::{HashMap, HashSet};

use crate::{mining::rules::IndexedRule, utils::nan_safe_f64_cmp_desc};

/// The itemsets of a rule regardless of its direction.
fn pair_key<'a>(a: &'a [usize], b: &'a [usize]) -> (&'a [usize], &'a [usize]) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sorts the rules by descending lift, keeping the order of rules with equal lift.
fn sort_by_lift(rules: &mut [IndexedRule]) {
    rules.sort_by(|a, b| nan_safe_f64_cmp_desc(&a.lift, &b.lift));
}

/// Reduces the rules to the canonical positive rules.
///
/// Only rules with a lift above one survive. Of the two directions `A => B` and `B => A` only
/// one is kept: the reverse direction replaces the stronger-lift one iff its confidence is
/// strictly higher. The output is sorted by descending lift.
pub(crate) fn canonicalize(rules: Vec<IndexedRule>) -> Vec<IndexedRule> {
    let mut positive = rules
        .into_iter()
        .filter(|rule| rule.lift > 1.)
        .collect::<Vec<_>>();
    sort_by_lift(&mut positive);

    let mut directions = HashMap::with_capacity(positive.len());
    for (idx, rule) in positive.iter().enumerate() {
        directions
            .entry((rule.antecedent.as_slice(), rule.consequent.as_slice()))
            .or_insert(idx);
    }

    let mut processed = HashSet::with_capacity(positive.len());
    let mut canonical = positive
        .iter()
        .filter(|rule| processed.insert(pair_key(&rule.antecedent, &rule.consequent)))
        .map(|rule| {
            directions
                .get(&(rule.consequent.as_slice(), rule.antecedent.as_slice()))
                .map(|&idx| &positive[idx])
                .filter(|reverse| reverse.confidence > rule.confidence)
                .unwrap_or(rule)
                .clone()
        })
        .collect::<Vec<_>>();
    sort_by_lift(&mut canonical);

    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(antecedent: &[usize], consequent: &[usize], confidence: f64, lift: f64) -> IndexedRule {
        IndexedRule {
            antecedent: antecedent.to_vec(),
            consequent: consequent.to_vec(),
            support: 0.5,
            confidence,
            lift,
        }
    }

    #[test]
    fn test_non_positive_rules_are_dropped() {
        let canonical = canonicalize(vec![
            rule(&[0], &[1], 0.5, 1.),
            rule(&[1], &[0], 0.5, 0.8),
            rule(&[0], &[2], 0.5, f64::NAN),
        ]);

        assert!(canonical.is_empty());
    }

    #[test]
    fn test_higher_confidence_direction_wins() {
        let canonical = canonicalize(vec![rule(&[0], &[1], 0.6, 2.), rule(&[1], &[0], 0.9, 2.)]);

        assert_eq!(canonical, vec![rule(&[1], &[0], 0.9, 2.)]);
    }

    #[test]
    fn test_equal_confidence_keeps_first_in_sorted_order() {
        let canonical = canonicalize(vec![rule(&[0], &[1], 1., 1.5), rule(&[1], &[0], 1., 1.5)]);

        assert_eq!(canonical, vec![rule(&[0], &[1], 1., 1.5)]);
    }

    #[test]
    fn test_one_rule_per_pair_sorted_by_lift() {
        let canonical = canonicalize(vec![
            rule(&[0], &[1], 1., 4. / 3.),
            rule(&[1], &[0], 1., 4. / 3.),
            rule(&[2], &[3], 1., 4.),
            rule(&[3], &[2], 0.5, 4.),
            rule(&[0, 1], &[2], 0.2, 1.1),
            rule(&[2], &[0, 1], 0.7, 1.1),
            rule(&[0], &[1, 2], 0.3, 1.1),
        ]);

        assert_eq!(
            canonical,
            vec![
                rule(&[2], &[3], 1., 4.),
                rule(&[0], &[1], 1., 4. / 3.),
                rule(&[2], &[0, 1], 0.7, 1.1),
                rule(&[0], &[1, 2], 0.3, 1.1),
            ],
        );
        let pairs = canonical
            .iter()
            .map(|rule| pair_key(&rule.antecedent, &rule.consequent))
            .collect::<HashSet<_>>();
        assert_eq!(pairs.len(), canonical.len());
        assert!(canonical.iter().all(|rule| rule.lift > 1.));
    }

    #[test]
    fn test_unpaired_rule_is_kept() {
        let canonical = canonicalize(vec![rule(&[0], &[1], 0.4, 1.2)]);

        assert_eq!(canonical, vec![rule(&[0], &[1], 0.4, 1.2)]);
    }
}
