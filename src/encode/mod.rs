//! Output encoders.
//!
//! Encoders consume a finished [`crate::Animation`]; none of them touch the render pipeline.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// Looping GIF89a output through the `gif` crate.
pub mod gif;
