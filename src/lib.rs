//! dotmtx renders text as a scrolling LED dot-matrix animation.
//!
//! A render runs in four stages, each a plain function over immutable inputs:
//!
//! - [`compose::dot_matrix`]: rasterize the text into logical on/off dots
//! - [`plan`]: clamp the parameters and derive window, period and frame timing
//! - [`compose::canvas`]: draw one scroll period plus a wraparound head into a pixel canvas
//! - [`extract`]: slice the canvas into window-sized frames
//!
//! [`Engine`] ties the stages together and answers oversized requests with a pre-rendered
//! fallback animation. Encoders for GIF and MP4 live in [`encode`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Text and canvas composition.
pub mod compose;
/// Engine configuration.
pub mod config;
/// Output encoders.
pub mod encode;
/// Shared render context and overflow handling.
pub mod engine;
/// Frame extraction.
pub mod extract;
/// Core value types and errors.
pub mod foundation;
/// Animation and frame model.
pub mod model;
/// Scroll planning.
pub mod plan;
/// Font rasterization.
pub mod raster;
/// Request parsing and validation.
pub mod request;

pub use crate::config::{EngineConfig, FallbackConfig, Limits};
pub use crate::encode::ffmpeg::{Mp4Opts, write_mp4};
pub use crate::encode::gif::{encode_gif_bytes, write_gif};
pub use crate::engine::Engine;
pub use crate::foundation::core::{DotGeometry, IndexedGrid, Overflow, Palette, Rgb8};
pub use crate::foundation::error::{DotmtxError, DotmtxResult};
pub use crate::model::{Animation, Disposal, Frame};
pub use crate::plan::planner::{AnimationPlan, PlanParams, Timing};
pub use crate::raster::font::{FontChoice, MonoRasterizer, Rasterizer};
pub use crate::request::{RenderRequest, RequestError};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
