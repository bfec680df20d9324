/// Bitmap font metrics and glyph masks.
pub mod font;
