use crate::{
    config::Limits,
    foundation::core::{DOT_LIT, DOT_OFF, DotGeometry, IndexedGrid, Overflow},
    raster::font::{GlyphMask, Rasterizer},
};

/// Text laid out in logical dots: every cell is either [`DOT_OFF`] or [`DOT_LIT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotMatrix {
    grid: IndexedGrid,
}

impl DotMatrix {
    /// Off-filled matrix of the mask's size with the lit mask cells overlaid.
    pub fn from_mask(mask: &GlyphMask) -> Self {
        let mut grid = IndexedGrid::new(mask.width(), mask.height(), DOT_OFF);
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.is_lit(x, y) {
                    grid.set(x, y, DOT_LIT);
                }
            }
        }
        Self { grid }
    }

    /// Width in dots, the text advance.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in dots, the font row height.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Dot index at `(x, y)`, `None` when out of bounds.
    pub fn dot(&self, x: u32, y: u32) -> Option<u8> {
        self.grid.get(x, y)
    }

    /// Underlying grid, one cell per dot.
    pub fn grid(&self) -> &IndexedGrid {
        &self.grid
    }
}

/// Advance of `text` in dots, or [`Overflow::Width`] when it exceeds `max_width / dot_size`.
pub fn checked_advance(
    rasterizer: &dyn Rasterizer,
    text: &str,
    limits: &Limits,
    dots: DotGeometry,
) -> Result<u32, Overflow> {
    let advance = rasterizer.measure(text);
    let max_dots = limits.max_width / dots.dot_size();
    if advance > u64::from(max_dots) {
        return Err(Overflow::Width { advance, max_dots });
    }
    // Bounded by `max_dots` above.
    Ok(advance as u32)
}

/// Measure `text` and, when it fits, rasterize it into a [`DotMatrix`].
///
/// The advance is checked before any mask is allocated.
pub fn compose_dot_matrix(
    rasterizer: &dyn Rasterizer,
    text: &str,
    limits: &Limits,
    dots: DotGeometry,
) -> Result<DotMatrix, Overflow> {
    checked_advance(rasterizer, text, limits, dots)?;

    let mask = rasterizer.rasterize(text);
    Ok(DotMatrix::from_mask(&mask))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/dot_matrix.rs"]
mod tests;
