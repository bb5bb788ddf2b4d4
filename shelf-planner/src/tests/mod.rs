mod utils;

pub(crate) use self::{
    systems::MockCommonSystems,
    utils::{itemset, line, rule, transactions, unit_square},
};

pub(crate) use crate::planner::systems::{MockAssignmentSystem, MockAssociationSystem};
