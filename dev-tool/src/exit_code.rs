/// The command ran without any error.
pub const NO_ERROR: i32 = 0;
/// The command produced an output but some receipts or the analysis failed.
pub const NON_FATAL_ERROR: i32 = 1;
/// The command couldn't produce any output.
pub const FATAL_ERROR: i32 = 2;
