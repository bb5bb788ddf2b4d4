//! Shared helpers for the tests of the workspace crates.
//!
//! The sample data lives in the `data` directory of the workspace.

mod approx_eq;
pub mod asset;
pub mod store;

pub use approx_eq::ApproxEqIter;
#[doc(hidden)]
pub use float_cmp::approx_eq;
