/// Bring-up sequence tests.
pub mod bringup;
/// Video merge tests.
pub mod merge;
