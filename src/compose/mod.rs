//! Text to dot matrix, dot matrix to backing canvas.

/// Backing canvas layout and drawing.
pub mod canvas;
/// Text rasterization into logical dots.
pub mod dot_matrix;
