use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::DotGeometry,
    foundation::error::{DotmtxError, DotmtxResult},
    raster::font::{FontChoice, MonoRasterizer, Rasterizer},
};

/// Resource limits enforced on every request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum text length in UTF-8 bytes.
    pub max_text_len: usize,
    /// Maximum backing canvas width in pixels. Must fit a GIF logical screen (`u16`).
    pub max_width: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_len: 100,
            max_width: 10922,
        }
    }
}

/// Parameters used to render the fallback animation at startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallbackConfig {
    /// Message shown in place of an oversized animation.
    pub text: String,
    /// Scroll speed in characters per second.
    pub speed: f64,
    /// Window width multiplier.
    pub width: f64,
    /// Trailing blank multiplier.
    pub blank: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            text: "TOO BIG".to_string(),
            speed: 4.0,
            width: 1.0,
            blank: 1.0,
        }
    }
}

/// Immutable engine configuration, loaded once at startup.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Request and canvas limits.
    pub limits: Limits,
    /// Dot cell geometry.
    pub dots: DotGeometry,
    /// Built-in font used by [`crate::Engine::new`].
    pub font: FontChoice,
    /// Animation served for oversized requests.
    pub fallback: FallbackConfig,
    /// Extract frames on the rayon pool instead of sequentially.
    pub parallel_extract: bool,
}

impl EngineConfig {
    /// Check limits, dot geometry and the fallback text.
    ///
    /// Geometry is checked with overflow-safe arithmetic before anything else uses it.
    pub fn validate(&self) -> DotmtxResult<()> {
        if self.limits.max_text_len == 0 {
            return Err(DotmtxError::validation("limits.max_text_len must be > 0"));
        }
        if self.limits.max_width == 0 || self.limits.max_width > u32::from(u16::MAX) {
            return Err(DotmtxError::validation(
                "limits.max_width must be in 1..=65535",
            ));
        }
        if self.dots.inner_size == 0 {
            return Err(DotmtxError::validation("dots.inner_size must be > 0"));
        }
        let dot_size = self.dots.checked_dot_size().ok_or_else(|| {
            DotmtxError::validation("dots.inner_size + 2 * dots.padding overflows")
        })?;
        if dot_size > self.limits.max_width {
            return Err(DotmtxError::validation(
                "a single dot does not fit limits.max_width",
            ));
        }
        self.check_row_height(MonoRasterizer::new(self.font).row_height())?;
        if self.fallback.text.is_empty() {
            return Err(DotmtxError::validation("fallback.text must not be empty"));
        }
        Ok(())
    }

    /// Reject fonts whose rows would make the canvas taller than `limits.max_width`.
    ///
    /// Expects geometry that already passed [`EngineConfig::validate`].
    pub fn check_row_height(&self, row_height: u32) -> DotmtxResult<()> {
        let height = self.dots.extent_px(row_height);
        if height > u64::from(self.limits.max_width) {
            return Err(DotmtxError::validation(format!(
                "canvas height {height} px for {row_height} font rows exceeds limits.max_width"
            )));
        }
        Ok(())
    }

    /// Read and validate a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> DotmtxResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: EngineConfig = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
