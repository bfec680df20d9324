use std::{borrow::Cow, io::Write};

use gif::{DisposalMethod, Encoder, Repeat};

use crate::{
    foundation::error::{DotmtxError, DotmtxResult},
    model::{Animation, Disposal},
};

/// Encode `anim` as a looping GIF89a with the animation palette as the global color table.
///
/// Frame buffers already hold palette indices, so they are written without quantization.
#[tracing::instrument(
    skip(anim, out),
    fields(frames = anim.frame_count(), width = anim.width, height = anim.height)
)]
pub fn write_gif<W: Write>(anim: &Animation, out: W) -> DotmtxResult<()> {
    let width = screen_dim(anim.width, "width")?;
    let height = screen_dim(anim.height, "height")?;
    if anim.frames.is_empty() {
        return Err(DotmtxError::encode("animation has no frames"));
    }

    let palette = anim.palette.to_rgb_bytes();
    let mut encoder = Encoder::new(out, width, height, &palette)
        .map_err(|e| DotmtxError::encode(format!("gif header: {e}")))?;
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| DotmtxError::encode(format!("gif loop extension: {e}")))?;

    for (i, frame) in anim.frames.iter().enumerate() {
        if frame.width() != anim.width || frame.height() != anim.height {
            return Err(DotmtxError::internal(format!(
                "frame {i} is {}x{}, animation is {}x{}",
                frame.width(),
                frame.height(),
                anim.width,
                anim.height
            )));
        }
        let delay = u16::try_from(frame.delay_cs).unwrap_or_else(|_| {
            tracing::warn!(frame = i, delay_cs = frame.delay_cs, "frame delay saturated");
            u16::MAX
        });
        let out_frame = gif::Frame {
            delay,
            dispose: disposal_method(frame.disposal),
            width,
            height,
            buffer: Cow::Borrowed(frame.pixels.as_bytes()),
            ..Default::default()
        };
        encoder
            .write_frame(&out_frame)
            .map_err(|e| DotmtxError::encode(format!("gif frame {i}: {e}")))?;
    }

    let mut out = encoder
        .into_inner()
        .map_err(|e| DotmtxError::encode(format!("gif trailer: {e}")))?;
    out.flush()
        .map_err(|e| DotmtxError::encode(format!("gif flush: {e}")))
}

/// [`write_gif`] into a fresh buffer.
pub fn encode_gif_bytes(anim: &Animation) -> DotmtxResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_gif(anim, &mut buf)?;
    Ok(buf)
}

fn screen_dim(v: u32, what: &str) -> DotmtxResult<u16> {
    match u16::try_from(v) {
        Ok(0) | Err(_) => Err(DotmtxError::encode(format!(
            "gif {what} must be in 1..=65535, got {v}"
        ))),
        Ok(v) => Ok(v),
    }
}

fn disposal_method(d: Disposal) -> DisposalMethod {
    match d {
        Disposal::Keep => DisposalMethod::Keep,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
