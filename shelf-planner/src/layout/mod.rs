pub(crate) mod assignment;
pub(crate) mod goal;
pub(crate) mod shelf;

pub use self::{
    assignment::{
        Assigner,
        Diagnostics,
        Parity,
        Placement,
        ShelfAssignment,
        Unassigned,
        UnassignedReason,
    },
    goal::{Goal, GoalError},
    shelf::{LayoutError, Position, Shelf, ShelfLayout},
};
