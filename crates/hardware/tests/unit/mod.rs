/// Controller component tests.
pub mod ctrl;
/// Behavioral device model tests.
pub mod device;
/// Statistics reporting tests.
pub mod stats;
