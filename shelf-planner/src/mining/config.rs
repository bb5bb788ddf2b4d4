use displaydoc::Display;
use thiserror::Error;

/// The configuration of the association analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    min_support: f64,
    top_rules: usize,
    max_itemset_len: Option<usize>,
}

/// Potential errors of the association analysis configuration.
#[derive(Copy, Clone, Debug, Display, Error, PartialEq)]
pub enum Error {
    /// Invalid minimum support, expected value from the half-open interval (0, 1]
    MinSupport,
    /// Invalid number of top rules, expected positive value
    TopRules,
    /// Invalid maximum itemset length, expected value of at least 2
    MaxItemsetLen,
}

impl Config {
    /// The initial support threshold of the adaptive support search.
    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    /// Sets the initial support threshold.
    ///
    /// # Errors
    /// Fails if the support is outside of the half-open interval (0, 1].
    pub fn with_min_support(self, min_support: f64) -> Result<Self, Error> {
        if min_support > 0. && min_support <= 1. {
            Ok(Self {
                min_support,
                ..self
            })
        } else {
            Err(Error::MinSupport)
        }
    }

    /// The number of strongest rules exposed for display.
    pub fn top_rules(&self) -> usize {
        self.top_rules
    }

    /// Sets the number of strongest rules exposed for display.
    ///
    /// # Errors
    /// Fails if the number is zero.
    pub fn with_top_rules(self, top_rules: usize) -> Result<Self, Error> {
        if top_rules > 0 {
            Ok(Self { top_rules, ..self })
        } else {
            Err(Error::TopRules)
        }
    }

    /// The maximum size of the mined itemsets, unbounded if `None`.
    pub fn max_itemset_len(&self) -> Option<usize> {
        self.max_itemset_len
    }

    /// Sets the maximum size of the mined itemsets.
    ///
    /// # Errors
    /// Fails if the size is below 2, because rules need at least two categories.
    pub fn with_max_itemset_len(self, max_itemset_len: Option<usize>) -> Result<Self, Error> {
        match max_itemset_len {
            Some(len) if len < 2 => Err(Error::MaxItemsetLen),
            _ => Ok(Self {
                max_itemset_len,
                ..self
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_support: 0.1,
            top_rules: 10,
            max_itemset_len: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use test_utils::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();

        assert_approx_eq!(f64, config.min_support(), 0.1);
        assert_eq!(config.top_rules(), 10);
        assert_eq!(config.max_itemset_len(), None);
    }

    #[rstest(support, case(0.), case(-0.5), case(1.5), case(f64::NAN))]
    fn test_invalid_min_support(support: f64) {
        assert_eq!(
            Config::default().with_min_support(support).unwrap_err(),
            Error::MinSupport,
        );
    }

    #[rstest(support, case(0.05), case(1.))]
    fn test_valid_min_support(support: f64) {
        let config = Config::default().with_min_support(support).unwrap();
        assert_approx_eq!(f64, config.min_support(), support);
    }

    #[test]
    fn test_top_rules() {
        assert_eq!(
            Config::default().with_top_rules(0).unwrap_err(),
            Error::TopRules,
        );
        assert_eq!(
            Config::default()
                .with_top_rules(3)
                .unwrap()
                .top_rules(),
            3,
        );
    }

    #[test]
    fn test_max_itemset_len() {
        assert_eq!(
            Config::default()
                .with_max_itemset_len(Some(1))
                .unwrap_err(),
            Error::MaxItemsetLen,
        );
        assert_eq!(
            Config::default()
                .with_max_itemset_len(Some(2))
                .unwrap()
                .max_itemset_len(),
            Some(2),
        );
        assert_eq!(
            Config::default()
                .with_max_itemset_len(None)
                .unwrap()
                .max_itemset_len(),
            None,
        );
    }
}
