use crate::{
    compose::dot_matrix::DotMatrix,
    foundation::core::{BACKGROUND, DOT_OFF, DotGeometry, IndexedGrid, Overflow},
    foundation::error::DotmtxResult,
    foundation::math::{bounded_extent, ceil_columns},
};

/// Geometry of the backing canvas and of the sliding window, in dots and pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CanvasLayout {
    /// Text advance, in dots.
    pub dot_matrix_width: u32,
    /// Font row height, in dots.
    pub rows: u32,
    /// Dots visible in the window at once.
    pub window_columns: u32,
    /// Period of one scroll cycle (text + trailing blank), in dots.
    pub backing_columns: u32,
    /// Off dots drawn after the text.
    pub blank_columns: u32,
    /// Canvas width in pixels: both copies plus the outer margin.
    pub width_px: u32,
    /// Canvas and frame height in pixels.
    pub height_px: u32,
    /// Frame width in pixels.
    pub window_width_px: u32,
    /// Dot cell geometry the pixel sizes were computed with.
    pub dots: DotGeometry,
}

impl CanvasLayout {
    /// Compute the layout for already clamped multipliers.
    ///
    /// The width check runs in floating point before anything is allocated; a non-finite,
    /// negative or oversized canvas is reported as [`Overflow::Size`].
    pub fn compute(
        dot_matrix_width: u32,
        rows: u32,
        width_mult: f64,
        blank_mult: f64,
        dots: DotGeometry,
        max_width: u32,
    ) -> Result<Self, Overflow> {
        let window = ceil_columns(width_mult, dot_matrix_width);
        let backing = ceil_columns(1.0 + blank_mult, dot_matrix_width);
        let canvas_width =
            (backing + window) * f64::from(dots.dot_size()) + 2.0 * f64::from(dots.padding);

        let width_px = bounded_extent(canvas_width, max_width).ok_or(Overflow::Size {
            canvas_width,
            max_width,
        })?;

        // Both terms are non-negative and bounded by the checked canvas width.
        let window_columns = window as u32;
        let backing_columns = backing as u32;
        let blank_columns = ((blank_mult * f64::from(dot_matrix_width)).floor() as u32)
            .min(backing_columns.saturating_sub(dot_matrix_width));

        Ok(Self {
            dot_matrix_width,
            rows,
            window_columns,
            backing_columns,
            blank_columns,
            width_px,
            height_px: u32::try_from(dots.extent_px(rows)).unwrap_or(u32::MAX),
            window_width_px: u32::try_from(dots.extent_px(window_columns)).unwrap_or(u32::MAX),
            dots,
        })
    }
}

/// Pixel canvas holding one full scroll period plus a duplicated head for wraparound.
#[derive(Clone, Debug)]
pub struct BackingCanvas {
    grid: IndexedGrid,
    layout: CanvasLayout,
}

impl BackingCanvas {
    /// Draw `dm` and its blank run into a fresh canvas sized by `layout`.
    ///
    /// Dots within the first `window_columns` are drawn a second time one period to the right,
    /// so a window starting anywhere in `[0, backing_columns)` never has to wrap.
    pub fn compose(dm: &DotMatrix, layout: &CanvasLayout) -> DotmtxResult<Self> {
        let mut canvas = Self {
            grid: IndexedGrid::new(layout.width_px, layout.height_px, BACKGROUND),
            layout: *layout,
        };

        for y in 0..dm.height() {
            for x in 0..dm.width() {
                if let Some(dot) = dm.dot(x, y) {
                    canvas.draw_dot(x, y, dot)?;
                }
            }
        }

        let blank_end = layout.dot_matrix_width + layout.blank_columns;
        for y in 0..dm.height() {
            for x in layout.dot_matrix_width..blank_end {
                canvas.draw_dot(x, y, DOT_OFF)?;
            }
        }

        Ok(canvas)
    }

    fn draw_dot(&mut self, x: u32, y: u32, dot: u8) -> DotmtxResult<()> {
        let dots = self.layout.dots;
        let py = dots.inner_origin_px(y);
        self.grid.fill_rect(
            dots.inner_origin_px(x),
            py,
            dots.inner_size,
            dots.inner_size,
            dot,
        )?;
        if x < self.layout.window_columns {
            self.grid.fill_rect(
                dots.inner_origin_px(x + self.layout.backing_columns),
                py,
                dots.inner_size,
                dots.inner_size,
                dot,
            )?;
        }
        Ok(())
    }

    /// Layout the canvas was drawn for.
    pub fn layout(&self) -> &CanvasLayout {
        &self.layout
    }

    /// Canvas pixels.
    pub fn grid(&self) -> &IndexedGrid {
        &self.grid
    }

    /// Copy the window whose left edge sits at dot `column`, re-anchored at `(0, 0)`.
    pub fn window_at(&self, column: u32) -> DotmtxResult<IndexedGrid> {
        self.grid.copy_rect(
            column * self.layout.dots.dot_size(),
            0,
            self.layout.window_width_px,
            self.layout.height_px,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
