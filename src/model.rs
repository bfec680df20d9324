use crate::foundation::core::{IndexedGrid, Palette};

/// What a decoder does with a frame before drawing the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Disposal {
    /// Leave the frame in place. Every frame covers the whole window, so nothing leaks through.
    #[default]
    Keep,
}

/// One window-sized frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Window-sized palette indices.
    pub pixels: IndexedGrid,
    /// Display time in centiseconds; 0 on the single frame of a static animation.
    pub delay_cs: u32,
    /// Disposal applied before the next frame.
    pub disposal: Disposal,
}

impl Frame {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Expand palette indices into straight RGBA8.
    pub fn to_rgba_image(&self, palette: &Palette) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let c = palette.color(self.pixels.get(x, y).unwrap_or_default());
            image::Rgba([c.r, c.g, c.b, 255])
        })
    }
}

/// Ordered, looping sequence of equally sized indexed frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Animation {
    /// Palette the frame indices refer to.
    pub palette: Palette,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames in display order.
    pub frames: Vec<Frame>,
}

impl Animation {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether this is a single frame with no delay.
    pub fn is_static(&self) -> bool {
        self.frames.len() == 1 && self.frames[0].delay_cs == 0
    }

    /// Sum of all frame delays, in centiseconds.
    pub fn total_duration_cs(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay_cs)).sum()
    }
}

#[cfg(test)]
#[path = "../tests/unit/model/model.rs"]
mod tests;
