/// Pixel grids, palette and dot geometry shared by every stage.
pub mod core;
/// Error and result types.
pub mod error;
pub(crate) mod math;
