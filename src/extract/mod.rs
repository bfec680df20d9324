/// Window slicing of a composed backing canvas.
pub mod frames;
