use crate::{
    data::{Rule, Transaction},
    layout::{Goal, ShelfAssignment, ShelfLayout},
    mining::{AnalysisError, AssociationAnalysis},
};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub(crate) trait AssociationSystem {
    /// Mines the canonical positive association rules of the transactions.
    fn analyze(&self, transactions: &[Transaction]) -> Result<AssociationAnalysis, AnalysisError>;
}

#[cfg_attr(test, automock)]
pub(crate) trait AssignmentSystem {
    /// Assigns the categories of the rules to the shelves of the layout.
    fn assign(&self, rules: &[Rule], layout: &ShelfLayout, goal: Goal) -> ShelfAssignment;
}

/// Common systems that we need in the planner.
pub(crate) trait CommonSystems {
    fn association(&self) -> &dyn AssociationSystem;
    fn assignment(&self) -> &dyn AssignmentSystem;
}
