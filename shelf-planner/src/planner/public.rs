use crate::{
    data::Transaction,
    error::Error,
    layout::{Assigner, Goal, ShelfLayout},
    mining::{AnalysisError, Association, AssociationAnalysis, Config},
    planner::{
        systems::{AssignmentSystem, AssociationSystem, CommonSystems},
        Recommendation,
    },
};

pub struct Systems {
    association: Association,
    assignment: Assigner,
}

impl CommonSystems for Systems {
    fn association(&self) -> &dyn AssociationSystem {
        &self.association
    }

    fn assignment(&self) -> &dyn AssignmentSystem {
        &self.assignment
    }
}

/// Recommends shelf placements of product categories from purchase transactions.
///
/// Every run is independent of the previous ones, only the errors of the last run are kept.
pub struct ShelfPlanner(super::Planner<Systems>);

impl ShelfPlanner {
    /// The diagnostics of the last call to [`analyze`](Self::analyze) or
    /// [`recommend`](Self::recommend).
    ///
    /// They can be downcast to an [`AnalysisError`] or a [`RuleError`](crate::RuleError).
    pub fn errors(&self) -> &[Error] {
        self.0.errors()
    }

    pub fn config(&self) -> &Config {
        self.0.common_systems.association.config()
    }

    /// Mines the canonical positive association rules of the transactions.
    pub fn analyze(
        &mut self,
        transactions: &[Transaction],
    ) -> Result<AssociationAnalysis, AnalysisError> {
        self.0.analyze(transactions)
    }

    /// Recommends a category for each shelf of the layout.
    ///
    /// This never fails, shelves which can't get a category are reported as unassigned.
    pub fn recommend(
        &mut self,
        transactions: &[Transaction],
        layout: &ShelfLayout,
        goal: Goal,
    ) -> Recommendation {
        self.0.recommend(transactions, layout, goal)
    }
}

#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Sets the configuration of the association analysis.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ShelfPlanner {
        ShelfPlanner(super::Planner::new(Systems {
            association: Association::new(self.config),
            assignment: Assigner,
        }))
    }
}
