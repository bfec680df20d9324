use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_5X7, FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X13, FONT_8X13, FONT_9X15},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

/// Lit/unlit mask covering exactly `advance x row_height` dots, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    lit: Vec<bool>,
}

impl GlyphMask {
    /// All-unlit mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            lit: vec![false; width as usize * height as usize],
        }
    }

    /// Width in dots.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in dots.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is lit; out-of-bounds dots are unlit.
    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.lit[y as usize * self.width as usize + x as usize]
    }

    /// Set one dot; out-of-bounds writes are ignored.
    pub fn set_lit(&mut self, x: u32, y: u32, lit: bool) {
        if x < self.width && y < self.height {
            self.lit[y as usize * self.width as usize + x as usize] = lit;
        }
    }

    /// Number of lit dots.
    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|&&l| l).count()
    }
}

impl OriginDimensions for GlyphMask {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for GlyphMask {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Glyphs never extend past the measured advance, but clip anyway.
            if let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) {
                self.set_lit(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

/// Turns text into dots.
///
/// Implementations must be deterministic: identical text always yields the identical mask.
pub trait Rasterizer: Send + Sync {
    /// Advance of a single character, in dots.
    fn char_width(&self) -> u32;

    /// Height of a text row, in dots.
    fn row_height(&self) -> u32;

    /// Advance width of `text` in dots, without rendering anything.
    fn measure(&self, text: &str) -> u64;

    /// Render `text` into a mask of exactly `measure(text) x row_height()` dots.
    ///
    /// Callers check `measure` against their limits first.
    fn rasterize(&self, text: &str) -> GlyphMask;
}

/// Built-in monospace bitmap fonts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    /// 5x7 dots.
    Font5x7,
    /// 5x8 dots.
    Font5x8,
    /// 6x10 dots.
    Font6x10,
    /// 6x13 dots.
    #[default]
    Font6x13,
    /// 7x13 dots.
    Font7x13,
    /// 8x13 dots.
    Font8x13,
    /// 9x15 dots.
    Font9x15,
}

impl FontChoice {
    /// The `embedded-graphics` ASCII font behind this choice.
    pub fn mono_font(self) -> MonoFont<'static> {
        match self {
            Self::Font5x7 => FONT_5X7,
            Self::Font5x8 => FONT_5X8,
            Self::Font6x10 => FONT_6X10,
            Self::Font6x13 => FONT_6X13,
            Self::Font7x13 => FONT_7X13,
            Self::Font8x13 => FONT_8X13,
            Self::Font9x15 => FONT_9X15,
        }
    }
}

/// [`Rasterizer`] backed by an `embedded-graphics` monospace font.
///
/// Each `char` takes exactly one advance. Control characters render as blank cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonoRasterizer {
    choice: FontChoice,
    advance: u32,
    row_height: u32,
}

impl MonoRasterizer {
    /// Rasterizer for `choice`, with metrics read from the font.
    pub fn new(choice: FontChoice) -> Self {
        let font = choice.mono_font();
        Self {
            choice,
            advance: font.character_size.width + font.character_spacing,
            row_height: font.character_size.height,
        }
    }

    /// Font this rasterizer draws with.
    pub fn font_choice(&self) -> FontChoice {
        self.choice
    }
}

impl Default for MonoRasterizer {
    fn default() -> Self {
        Self::new(FontChoice::default())
    }
}

impl Rasterizer for MonoRasterizer {
    fn char_width(&self) -> u32 {
        self.advance
    }

    fn row_height(&self) -> u32 {
        self.row_height
    }

    fn measure(&self, text: &str) -> u64 {
        text.chars().count() as u64 * u64::from(self.advance)
    }

    fn rasterize(&self, text: &str) -> GlyphMask {
        let width = u32::try_from(self.measure(text)).unwrap_or(u32::MAX);
        let mut mask = GlyphMask::new(width, self.row_height);

        let font = self.choice.mono_font();
        let style = MonoTextStyle::new(&font, BinaryColor::On);
        let step = i32::try_from(self.advance).unwrap_or(i32::MAX);

        let mut x = 0i32;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            if !ch.is_control() {
                let glyph = ch.encode_utf8(&mut buf);
                let Ok(_) = Text::with_baseline(glyph, Point::new(x, 0), style, Baseline::Top)
                    .draw(&mut mask);
            }
            x = x.saturating_add(step);
        }

        mask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/font.rs"]
mod tests;
