//! Recommends where to place product categories on the shelves of a store.
//!
//! The categories which are bought together are mined as association rules from the purchase
//! transactions. The categories with the strongest associations are then either clustered
//! around the center of the shelf layout or spread over alternating shelves.

mod classify;
mod data;
mod encoder;
mod error;
mod layout;
mod mining;
mod planner;
mod scoring;
mod utils;

#[cfg(test)]
mod tests;

#[cfg(test)]
use rstest_reuse;

pub use crate::{
    classify::{
        categorize_receipts,
        CategorizedReceipt,
        Categorization,
        CategoryClassifier,
        FailedReceipt,
        IdentityClassifier,
        Prediction,
    },
    data::{Itemset, Rule, Transaction},
    encoder::PresenceMatrix,
    error::Error,
    layout::{
        Diagnostics,
        Goal,
        GoalError,
        LayoutError,
        Parity,
        Placement,
        Position,
        Shelf,
        ShelfAssignment,
        ShelfLayout,
        Unassigned,
        UnassignedReason,
    },
    mining::{AnalysisError, AssociationAnalysis, Config, ConfigError, RuleError},
    planner::{
        public::{Builder, ShelfPlanner},
        AnalysisSummary,
        Recommendation,
    },
    scoring::{category_relations, CategoryRelations, CategoryScore, CategoryScores, Relation},
};
