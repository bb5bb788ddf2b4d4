pub(crate) mod public;
pub(crate) mod systems;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    data::{Rule, Transaction},
    error::Error,
    layout::{Goal, ShelfAssignment, ShelfLayout, UnassignedReason},
    mining::{AnalysisError, AssociationAnalysis},
    planner::systems::CommonSystems,
};

/// The outcome of the association analysis of a recommendation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_transactions: usize,
    /// The support threshold which was used, if the mining got that far.
    pub min_support: Option<f64>,
    /// The number of canonical positive rules.
    pub total_rules: usize,
    pub top_rules: Vec<Rule>,
    /// Why the analysis didn't yield any positive rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&AssociationAnalysis> for AnalysisSummary {
    fn from(analysis: &AssociationAnalysis) -> Self {
        Self {
            total_transactions: analysis.total_transactions,
            min_support: Some(analysis.min_support),
            total_rules: analysis.total_rules(),
            top_rules: analysis.top_rules.clone(),
            message: None,
        }
    }
}

impl From<&AnalysisError> for AnalysisSummary {
    fn from(error: &AnalysisError) -> Self {
        Self {
            total_transactions: error.transactions(),
            min_support: error.min_support(),
            total_rules: 0,
            top_rules: Vec::new(),
            message: Some(error.to_string()),
        }
    }
}

/// A shelf assignment together with the analysis it is based on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub analysis: AnalysisSummary,
    pub assignment: ShelfAssignment,
}

pub(crate) struct Planner<CS> {
    common_systems: CS,
    errors: Vec<Error>,
}

impl<CS> Planner<CS>
where
    CS: CommonSystems,
{
    pub(crate) fn new(common_systems: CS) -> Self {
        Self {
            common_systems,
            errors: Vec::new(),
        }
    }

    /// The errors of the last call to `analyze` or `recommend`.
    pub(crate) fn errors(&self) -> &[Error] {
        self.errors.as_slice()
    }

    pub(crate) fn analyze(
        &mut self,
        transactions: &[Transaction],
    ) -> Result<AssociationAnalysis, AnalysisError> {
        self.errors.clear();
        self.run_analysis(transactions)
    }

    /// Recommends a category for each shelf.
    ///
    /// A failed analysis leaves all shelves unassigned and is reported in the errors.
    pub(crate) fn recommend(
        &mut self,
        transactions: &[Transaction],
        layout: &ShelfLayout,
        goal: Goal,
    ) -> Recommendation {
        self.errors.clear();

        let recommendation = match self.run_analysis(transactions) {
            Ok(analysis) => Recommendation {
                analysis: (&analysis).into(),
                assignment: self
                    .common_systems
                    .assignment()
                    .assign(&analysis.rules, layout, goal),
            },
            Err(error) => {
                let recommendation = Recommendation {
                    analysis: (&error).into(),
                    assignment: ShelfAssignment::unassigned(
                        layout,
                        goal,
                        UnassignedReason::AnalysisFailed(error.to_string()),
                    ),
                };
                self.errors.push(error.into());
                recommendation
            }
        };
        info!(
            "Assigned {} of {} shelves with goal {}.",
            recommendation.assignment.assignments.len(),
            layout.len(),
            goal,
        );

        recommendation
    }

    /// Runs the association system and collects the skipped rules.
    fn run_analysis(
        &mut self,
        transactions: &[Transaction],
    ) -> Result<AssociationAnalysis, AnalysisError> {
        let analysis = self
            .common_systems
            .association()
            .analyze(transactions)?;
        self.errors
            .extend(analysis.skipped_rules.iter().cloned().map(Error::from));

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;
    use rstest_reuse::{apply, template};
    use test_utils::assert_approx_eq;

    use super::*;
    use crate::{
        mining::RuleError,
        tests::{
            line,
            rule,
            transactions,
            unit_square,
            MockAssignmentSystem,
            MockAssociationSystem,
            MockCommonSystems,
        },
    };

    macro_rules! contains_error {
        ($planner:expr, $error:pat $(,)?) => {
            $planner
                .errors()
                .iter()
                .any(|e| matches!(e.downcast_ref(), Some($error)))
        };
    }

    macro_rules! assert_contains_error {
        ($planner:expr, $error:pat $(,)?) => {
            assert!(contains_error!($planner, $error))
        };
    }

    fn store_receipts() -> Vec<Transaction> {
        transactions(&[&["A", "B"], &["A", "B"], &["A", "B"], &["C", "D"]])
    }

    /// Template to run a test with both goals.
    #[template]
    #[rstest(goal, case(Goal::Maximize), case(Goal::Minimize))]
    fn tmpl_goal_cases(goal: Goal) {}

    #[test]
    fn test_recommend_maximize() {
        let mut planner = Planner::new(MockCommonSystems::default());

        let recommendation = planner.recommend(&store_receipts(), &unit_square(), Goal::Maximize);

        assert!(planner.errors().is_empty());
        assert_eq!(recommendation.analysis.total_transactions, 4);
        assert_eq!(recommendation.analysis.total_rules, 2);
        assert_approx_eq!(f64, recommendation.analysis.min_support, Some(0.1));
        assert!(recommendation.analysis.message.is_none());
        // scores C = D = 4, A = B = 4/3 and all shelves are equidistant to the centroid
        let expected = [("A1", "C"), ("A2", "D"), ("B1", "B"), ("B2", "A")]
            .iter()
            .map(|(shelf, category)| (shelf.to_string(), category.to_string()))
            .collect::<BTreeMap<_, _>>();
        assert_eq!(recommendation.assignment.assignments, expected);
        assert!(recommendation.assignment.unassigned.is_none());
    }

    #[test]
    fn test_recommend_minimize() {
        let mut planner = Planner::new(MockCommonSystems::default());

        let recommendation =
            planner.recommend(&store_receipts(), &line(&[0., 1., 2.]), Goal::Minimize);

        let assignment = &recommendation.assignment;
        assert_eq!(assignment.category("s0"), Some("C"));
        assert_eq!(assignment.category("s1"), Some("D"));
        assert_eq!(assignment.category("s2"), Some("A"));
        assert_eq!(assignment.unplaced_categories, ["B"]);
    }

    #[apply(tmpl_goal_cases)]
    fn test_recommend_after_failed_analysis(goal: Goal) {
        let cs = MockCommonSystems::default().set_assignment(|| {
            let mut assignment = MockAssignmentSystem::new();
            assignment.expect_assign().never();
            assignment
        });
        let mut planner = Planner::new(cs);

        let recommendation =
            planner.recommend(&transactions(&[&["A", "B"]]), &unit_square(), goal);

        assert_contains_error!(planner, AnalysisError::InsufficientData { transactions: 1 });
        assert_eq!(recommendation.assignment.diagnostics.goal, goal);
        assert_eq!(recommendation.analysis.total_transactions, 1);
        assert_eq!(recommendation.analysis.min_support, None);
        assert!(recommendation.analysis.message.is_some());
        let unassigned = recommendation.assignment.unassigned.unwrap();
        assert!(matches!(
            unassigned.reason,
            UnassignedReason::AnalysisFailed(_),
        ));
        assert_eq!(unassigned.shelves.len(), 4);
    }

    #[apply(tmpl_goal_cases)]
    fn test_recommend_without_positive_association(goal: Goal) {
        let mut planner = Planner::new(MockCommonSystems::default());

        let recommendation = planner.recommend(
            &transactions(&[&["A", "B"], &["A", "B"], &["A", "C"]]),
            &unit_square(),
            goal,
        );

        assert_contains_error!(planner, AnalysisError::NoPositiveAssociation { .. });
        assert_eq!(recommendation.analysis.min_support, Some(0.1));
        assert!(recommendation.assignment.assignments.is_empty());
        assert_eq!(recommendation.assignment.unassigned_shelves().len(), 4);
    }

    #[test]
    fn test_skipped_rules_are_reported() {
        let cs = MockCommonSystems::default().set_association(|| {
            let mut association = MockAssociationSystem::new();
            association.expect_analyze().returning(|transactions| {
                Ok(AssociationAnalysis {
                    total_transactions: transactions.len(),
                    min_support: 0.5,
                    rules: vec![rule(&["A"], &["B"], 1., 2.)],
                    top_rules: vec![rule(&["A"], &["B"], 1., 2.)],
                    skipped_rules: vec![RuleError::ZeroSupport {
                        itemset: vec!["C".into()],
                        antecedent: vec!["C".into()],
                        consequent: vec!["D".into()],
                    }],
                })
            });
            association
        });
        let mut planner = Planner::new(cs);

        let analysis = planner.analyze(&store_receipts()).unwrap();
        assert_eq!(analysis.total_rules(), 1);
        assert_contains_error!(planner, RuleError::ZeroSupport { .. });

        let recommendation = planner.recommend(&store_receipts(), &unit_square(), Goal::Maximize);
        assert_eq!(planner.errors().len(), 1);
        assert_eq!(recommendation.assignment.assignments.len(), 2);
    }

    #[apply(tmpl_goal_cases)]
    fn test_errors_are_cleared_per_run(goal: Goal) {
        let mut planner = Planner::new(MockCommonSystems::default());

        planner.recommend(&[], &unit_square(), goal);
        assert_eq!(planner.errors().len(), 1);

        planner.recommend(&store_receipts(), &unit_square(), goal);
        assert!(planner.errors().is_empty());
    }

    #[test]
    fn test_analyze_returns_error() {
        let mut planner = Planner::new(MockCommonSystems::default());

        let error = planner.analyze(&[]).unwrap_err();

        assert_eq!(error, AnalysisError::InsufficientData { transactions: 0 });
        assert!(planner.errors().is_empty());
    }

    #[test]
    fn test_recommend_passes_rules_to_assignment() {
        let cs = MockCommonSystems::default().set_assignment(|| {
            let mut assignment = MockAssignmentSystem::new();
            assignment
                .expect_assign()
                .withf(|rules, layout, goal| {
                    rules.len() == 2 && layout.len() == 4 && *goal == Goal::Minimize
                })
                .times(1)
                .returning(|_, layout, goal| {
                    ShelfAssignment::unassigned(layout, goal, UnassignedReason::NoShelves)
                });
            assignment
        });
        let mut planner = Planner::new(cs);

        let recommendation = planner.recommend(&store_receipts(), &unit_square(), Goal::Minimize);

        assert_eq!(recommendation.analysis.total_rules, 2);
    }

    #[test]
    fn test_analysis_summary_serializes_without_message() {
        let mut planner = Planner::new(MockCommonSystems::default());

        let recommendation = planner.recommend(&store_receipts(), &unit_square(), Goal::Maximize);
        let json = serde_json::to_value(&recommendation.analysis).unwrap();

        assert_eq!(json["total_transactions"], 4);
        assert_eq!(json["top_rules"][0]["antecedent"][0], "C");
        assert!(json.get("message").is_none());
    }
}
