/// Type-erased error of a planner run.
///
/// The concrete errors can be recovered with `downcast_ref`, e.g. an
/// [`AnalysisError`](crate::AnalysisError) or a [`RuleError`](crate::RuleError).
pub type Error = anyhow::Error;
