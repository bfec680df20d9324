use crate::foundation::error::{DotmtxError, DotmtxResult};

/// Palette index of the canvas background (the gaps between dots).
pub const BACKGROUND: u8 = 0;
/// Palette index of an unlit dot.
pub const DOT_OFF: u8 = 1;
/// Palette index of a lit dot.
pub const DOT_LIT: u8 = 2;

/// Straight RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed three-entry palette shared by every animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [Rgb8; 3],
}

impl Palette {
    /// Background black, gray off dots, amber lit dots.
    pub const LED: Palette = Palette {
        colors: [
            Rgb8::new(0, 0, 0),
            Rgb8::new(50, 50, 50),
            Rgb8::new(255, 170, 0),
        ],
    };

    /// Colors in palette-index order.
    pub fn colors(&self) -> &[Rgb8; 3] {
        &self.colors
    }

    /// Look up a palette index; out-of-range indices map to the background color.
    pub fn color(&self, index: u8) -> Rgb8 {
        self.colors
            .get(usize::from(index))
            .copied()
            .unwrap_or(self.colors[usize::from(BACKGROUND)])
    }

    /// Flat `r, g, b, r, g, b, ...` bytes, the layout GIF color tables use.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::LED
    }
}

/// Physical size of one LED dot.
///
/// A dot occupies a `dot_size() x dot_size()` cell; only the inner `inner_size` square is
/// colored, leaving `padding` pixels of background on every side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotGeometry {
    /// Side of the colored square, in pixels.
    pub inner_size: u32,
    /// Background pixels around the square on each side.
    pub padding: u32,
}

impl Default for DotGeometry {
    fn default() -> Self {
        Self {
            inner_size: 6,
            padding: 1,
        }
    }
}

impl DotGeometry {
    /// Side of one dot cell, `inner_size + 2 * padding`.
    ///
    /// Only meaningful for validated geometry; see [`DotGeometry::checked_dot_size`].
    pub fn dot_size(self) -> u32 {
        self.inner_size + 2 * self.padding
    }

    /// [`DotGeometry::dot_size`], or `None` when it does not fit a `u32`.
    pub fn checked_dot_size(self) -> Option<u32> {
        self.padding
            .checked_mul(2)
            .and_then(|margin| margin.checked_add(self.inner_size))
    }

    /// Pixel extent of `dots` cells plus the outer margin on both sides.
    pub fn extent_px(self, dots: u32) -> u64 {
        let margin = 2 * u64::from(self.padding);
        let cell = u64::from(self.inner_size) + margin;
        u64::from(dots).saturating_mul(cell).saturating_add(margin)
    }

    /// Pixel origin of the colored inner block of dot `index` along one axis.
    pub fn inner_origin_px(self, index: u32) -> u32 {
        2 * self.padding + index * self.dot_size()
    }
}

/// Oversize signal raised by the composer or the planner.
///
/// Not an error: the engine answers it with the fallback animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overflow {
    /// The text advance exceeds the number of dots that fit `max_width`.
    Width {
        /// Advance of the text, in dots.
        advance: u64,
        /// Dots that fit the configured width.
        max_dots: u32,
    },
    /// The backing canvas width is non-finite, negative or larger than `max_width`.
    Size {
        /// Canvas width as computed in floating point, in pixels.
        canvas_width: f64,
        /// Configured maximum, in pixels.
        max_width: u32,
    },
}

impl std::fmt::Display for Overflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Width { advance, max_dots } => {
                write!(f, "text advance {advance} dots exceeds {max_dots}")
            }
            Self::Size {
                canvas_width,
                max_width,
            } => write!(f, "canvas width {canvas_width} px exceeds {max_width}"),
        }
    }
}

/// Owned 2D grid of palette indices.
///
/// Storage is row-major: pixel `(x, y)` lives at `y * stride + x`. Rows are tightly packed
/// (`stride == width`), so [`IndexedGrid::as_bytes`] can be handed to encoders as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexedGrid {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl IndexedGrid {
    /// Allocate a `width x height` grid filled with `fill`.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        let stride = width as usize;
        Self {
            width,
            height,
            stride,
            data: vec![fill; stride * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between the starts of two consecutive rows, in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw row-major palette indices.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.stride + x as usize)
    }

    /// Palette index at `(x, y)`, `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.offset(x, y).map(|i| self.data[i])
    }

    /// Write one pixel; returns `false` (and writes nothing) when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Row `y` as a slice of `width` indices.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = self.offset(0, y)?;
        Some(&self.data[start..start + self.width as usize])
    }

    fn check_rect(&self, x: u32, y: u32, w: u32, h: u32) -> DotmtxResult<()> {
        let fits = u64::from(x) + u64::from(w) <= u64::from(self.width)
            && u64::from(y) + u64::from(h) <= u64::from(self.height);
        if fits {
            Ok(())
        } else {
            Err(DotmtxError::internal(format!(
                "rect {w}x{h}+{x}+{y} exceeds {}x{} grid",
                self.width, self.height
            )))
        }
    }

    /// Fill the rectangle `[x, x + w) x [y, y + h)` with `value`.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, value: u8) -> DotmtxResult<()> {
        self.check_rect(x, y, w, h)?;
        for row in y..y + h {
            let start = row as usize * self.stride + x as usize;
            self.data[start..start + w as usize].fill(value);
        }
        Ok(())
    }

    /// Copy the rectangle `[x, x + w) x [y, y + h)` into a new grid anchored at `(0, 0)`.
    pub fn copy_rect(&self, x: u32, y: u32, w: u32, h: u32) -> DotmtxResult<IndexedGrid> {
        self.check_rect(x, y, w, h)?;
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for row in y..y + h {
            let start = row as usize * self.stride + x as usize;
            data.extend_from_slice(&self.data[start..start + w as usize]);
        }
        Ok(IndexedGrid {
            width: w,
            height: h,
            stride: w as usize,
            data,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
