use std::collections::{BTreeMap, HashSet};

use displaydoc::Display;
use serde::{Deserialize, Serialize};

use crate::{
    data::Rule,
    layout::{
        goal::Goal,
        shelf::{Position, ShelfLayout},
    },
    planner::systems::AssignmentSystem,
    scoring::{category_relations, CategoryRelations, CategoryScore, CategoryScores},
};

/// The shelf group of a category in a spreading assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    fn offset(self) -> usize {
        match self {
            Self::Even => 0,
            Self::Odd => 1,
        }
    }
}

/// A category placed on a shelf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub shelf: String,
    pub category: String,
    pub score: f64,
    /// The 1-based rank of the category by descending score.
    pub rank: usize,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Parity>,
}

/// Why shelves were left without a category.
#[derive(Clone, Debug, Display, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    /// No category can be assigned because the association analysis failed: {0}
    AnalysisFailed(String),
    /// No category can be assigned because there are no positive association rules
    NoPositiveRules,
    /// No category can be assigned because there are no shelves
    NoShelves,
    /// Some shelves got no category because there are not enough scored categories
    NotEnoughCategories,
}

impl UnassignedReason {
    /// Checks if the assignment was impossible as opposed to partial.
    pub fn is_impossible(&self) -> bool {
        !matches!(self, Self::NotEnoughCategories)
    }
}

/// The shelves without a category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unassigned {
    pub reason: UnassignedReason,
    pub message: String,
    pub shelves: Vec<String>,
}

impl Unassigned {
    fn new(reason: UnassignedReason, shelves: Vec<String>) -> Self {
        Self {
            message: reason.to_string(),
            reason,
            shelves,
        }
    }
}

/// Data to render and explain an assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub goal: Goal,
    pub shelf_positions: BTreeMap<String, Position>,
    pub centroid: Option<Position>,
    pub centroid_distances: BTreeMap<String, f64>,
    /// The distances to all other shelves per shelf.
    pub shelf_distances: BTreeMap<String, BTreeMap<String, f64>>,
    pub category_scores: CategoryScores,
    pub category_relations: CategoryRelations,
}

impl Diagnostics {
    fn new(layout: &ShelfLayout, rules: &[Rule], goal: Goal) -> Self {
        let shelves = layout.shelves();
        let centroid_distances = layout.centroid_distances();
        let pairwise_distances = layout.pairwise_distances();

        Self {
            goal,
            shelf_positions: shelves
                .iter()
                .map(|shelf| (shelf.name.clone(), shelf.position()))
                .collect(),
            centroid: layout.centroid(),
            centroid_distances: shelves
                .iter()
                .zip(centroid_distances.iter())
                .map(|(shelf, &distance)| (shelf.name.clone(), distance))
                .collect(),
            shelf_distances: shelves
                .iter()
                .enumerate()
                .map(|(i, shelf)| {
                    let others = shelves
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(j, other)| (other.name.clone(), pairwise_distances[[i, j]]))
                        .collect::<BTreeMap<_, _>>();
                    (shelf.name.clone(), others)
                })
                .collect(),
            category_scores: CategoryScores::from_rules(rules),
            category_relations: category_relations(rules),
        }
    }
}

/// The assignment of categories to shelves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelfAssignment {
    /// The category of each assigned shelf.
    pub assignments: BTreeMap<String, String>,
    /// The explanation of each assignment, in assignment order.
    pub placements: Vec<Placement>,
    /// The shelves without a category, `None` if every shelf got one.
    pub unassigned: Option<Unassigned>,
    /// Scored categories which didn't get a shelf, by descending score.
    pub unplaced_categories: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl ShelfAssignment {
    /// An assignment which leaves every shelf empty.
    pub fn unassigned(layout: &ShelfLayout, goal: Goal, reason: UnassignedReason) -> Self {
        let diagnostics = Diagnostics::new(layout, &[], goal);
        Self::from_placements(layout, Vec::new(), diagnostics, Some(reason))
    }

    fn from_placements(
        layout: &ShelfLayout,
        placements: Vec<Placement>,
        diagnostics: Diagnostics,
        reason: Option<UnassignedReason>,
    ) -> Self {
        let assignments = placements
            .iter()
            .map(|placement| (placement.shelf.clone(), placement.category.clone()))
            .collect::<BTreeMap<_, _>>();
        let placed = placements
            .iter()
            .map(|placement| placement.category.as_str())
            .collect::<HashSet<_>>();
        let unplaced_categories = diagnostics
            .category_scores
            .ranked()
            .into_iter()
            .filter(|score| !placed.contains(score.category.as_str()))
            .map(|score| score.category.clone())
            .collect();
        let empty_shelves = layout
            .shelves()
            .iter()
            .filter(|shelf| !assignments.contains_key(&shelf.name))
            .map(|shelf| shelf.name.clone())
            .collect::<Vec<_>>();
        let unassigned = match reason {
            Some(reason) => Some(Unassigned::new(reason, empty_shelves)),
            None if !empty_shelves.is_empty() => Some(Unassigned::new(
                UnassignedReason::NotEnoughCategories,
                empty_shelves,
            )),
            None => None,
        };

        Self {
            assignments,
            placements,
            unassigned,
            unplaced_categories,
            diagnostics,
        }
    }

    /// The category assigned to the shelf.
    pub fn category(&self, shelf: &str) -> Option<&str> {
        self.assignments.get(shelf).map(String::as_str)
    }

    /// The names of the shelves without a category.
    pub fn unassigned_shelves(&self) -> &[String] {
        self.unassigned
            .as_ref()
            .map(|unassigned| unassigned.shelves.as_slice())
            .unwrap_or_default()
    }
}

/// Places the strongest categories on the shelves closest to the centroid.
fn cluster(layout: &ShelfLayout, ranked: &[&CategoryScore]) -> Vec<Placement> {
    let distances = layout.centroid_distances();
    layout
        .by_centroid_distance()
        .into_iter()
        .zip(ranked)
        .enumerate()
        .map(|(i, (shelf, category))| Placement {
            shelf: layout.shelves()[shelf].name.clone(),
            category: category.category.clone(),
            score: category.score,
            rank: i + 1,
            reason: "High association score, placed close to the center".into(),
            centroid_distance: Some(distances[shelf]),
            group: None,
        })
        .collect()
}

/// Places the categories of even rank on the even shelves and the categories of odd rank on the
/// odd shelves.
///
/// Shelves are grouped by their supplied order, not by their positions.
fn spread(layout: &ShelfLayout, ranked: &[&CategoryScore]) -> Vec<Placement> {
    [Parity::Even, Parity::Odd]
        .iter()
        .flat_map(move |&parity| {
            let offset = parity.offset();
            layout
                .shelves()
                .iter()
                .skip(offset)
                .step_by(2)
                .zip(ranked.iter().skip(offset).step_by(2))
                .enumerate()
                .map(move |(i, (shelf, category))| Placement {
                    shelf: shelf.name.clone(),
                    category: category.category.clone(),
                    score: category.score,
                    rank: 2 * i + offset + 1,
                    reason: format!(
                        "Spread apart from related categories ({} shelf group)",
                        match parity {
                            Parity::Even => "even",
                            Parity::Odd => "odd",
                        },
                    ),
                    centroid_distance: None,
                    group: Some(parity),
                })
        })
        .collect()
}

/// Assigns the categories of the positive rules to the shelves.
pub(crate) fn assign(rules: &[Rule], layout: &ShelfLayout, goal: Goal) -> ShelfAssignment {
    let rules = rules
        .iter()
        .filter(|rule| rule.is_positive())
        .cloned()
        .collect::<Vec<_>>();
    let diagnostics = Diagnostics::new(layout, &rules, goal);

    let reason = if rules.is_empty() {
        Some(UnassignedReason::NoPositiveRules)
    } else if layout.is_empty() {
        Some(UnassignedReason::NoShelves)
    } else {
        None
    };
    let placements = match (&reason, goal) {
        (Some(_), _) => Vec::new(),
        (None, Goal::Maximize) => cluster(layout, &diagnostics.category_scores.ranked()),
        (None, Goal::Minimize) => spread(layout, &diagnostics.category_scores.ranked()),
    };

    ShelfAssignment::from_placements(layout, placements, diagnostics, reason)
}

/// The greedy assignment system.
#[derive(Clone, Copy, Debug, Default)]
pub struct Assigner;

impl AssignmentSystem for Assigner {
    fn assign(&self, rules: &[Rule], layout: &ShelfLayout, goal: Goal) -> ShelfAssignment {
        assign(rules, layout, goal)
    }
}
