use std::{
    io::{Read, Write as _},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    foundation::error::{DotmtxError, DotmtxResult},
    foundation::math::gcd_u32,
    model::Animation,
};

/// Options for [`write_mp4`].
#[derive(Clone, Debug)]
pub struct Mp4Opts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl Mp4Opts {
    /// Write to `out_path`, overwriting an existing file.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Constant-rate rendition of variable frame delays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSchedule {
    /// Input rate as `fps_num / fps_den` frames per second.
    pub fps_num: u32,
    /// Denominator of the input rate.
    pub fps_den: u32,
    /// How many times each animation frame is written.
    pub repeats: Vec<u32>,
}

/// Map centisecond delays onto a constant frame rate.
///
/// The rate is `100 / g` where `g` is the gcd of the non-zero delays; every frame is then
/// repeated `delay / g` times. An animation without any delay is a single frame at 1 fps.
pub fn frame_schedule(anim: &Animation) -> FrameSchedule {
    let g = anim
        .frames
        .iter()
        .map(|f| f.delay_cs)
        .filter(|&d| d > 0)
        .fold(0, gcd_u32);

    if g == 0 {
        return FrameSchedule {
            fps_num: 1,
            fps_den: 1,
            repeats: anim.frames.iter().take(1).map(|_| 1).collect(),
        };
    }

    let common = gcd_u32(100, g);
    FrameSchedule {
        fps_num: 100 / common,
        fps_den: g / common,
        repeats: anim.frames.iter().map(|f| f.delay_cs / g).collect(),
    }
}

/// Encode one loop of `anim` to H.264 MP4 through the system `ffmpeg`.
///
/// Raw RGBA frames are streamed to ffmpeg's stdin; ffmpeg's stderr is collected and reported
/// when it exits unsuccessfully.
#[tracing::instrument(skip(anim, opts), fields(out = %opts.out_path.display()))]
pub fn write_mp4(anim: &Animation, opts: &Mp4Opts) -> DotmtxResult<()> {
    if anim.width == 0 || anim.height == 0 || anim.frames.is_empty() {
        return Err(DotmtxError::encode("mp4 output needs at least one non-empty frame"));
    }
    if !anim.width.is_multiple_of(2) || !anim.height.is_multiple_of(2) {
        return Err(DotmtxError::encode(
            "mp4 width/height must be even (required for yuv420p output)",
        ));
    }

    ensure_parent_dir(&opts.out_path)?;
    if !opts.overwrite && opts.out_path.exists() {
        return Err(DotmtxError::validation(format!(
            "output file '{}' already exists",
            opts.out_path.display()
        )));
    }
    if !is_ffmpeg_on_path() {
        return Err(DotmtxError::encode(
            "ffmpeg is required for MP4 encoding, but was not found on PATH",
        ));
    }

    let schedule = frame_schedule(anim);
    tracing::debug!(
        fps = %format!("{}/{}", schedule.fps_num, schedule.fps_den),
        written = schedule.repeats.iter().map(|&r| u64::from(r)).sum::<u64>(),
        "mp4 frame schedule"
    );

    let mut cmd = Command::new("ffmpeg");
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    cmd.arg(if opts.overwrite { "-y" } else { "-n" });
    cmd.args([
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        &format!("{}x{}", anim.width, anim.height),
        "-r",
        &format!("{}/{}", schedule.fps_num, schedule.fps_den),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ]);
    cmd.arg(&opts.out_path);

    let mut child = cmd.spawn().map_err(|e| {
        DotmtxError::encode(format!(
            "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
        ))
    })?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| DotmtxError::encode("failed to open ffmpeg stdin"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| DotmtxError::encode("failed to open ffmpeg stderr"))?;
    let stderr_drain = std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok::<_, std::io::Error>(bytes)
    });

    let mut write_result = Ok(());
    'frames: for (frame, &repeat) in anim.frames.iter().zip(&schedule.repeats) {
        let rgba = frame.to_rgba_image(&anim.palette).into_raw();
        for _ in 0..repeat {
            if let Err(e) = stdin.write_all(&rgba) {
                write_result = Err(e);
                break 'frames;
            }
        }
    }
    drop(stdin);

    let status = child
        .wait()
        .map_err(|e| DotmtxError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
    let stderr_bytes = stderr_drain
        .join()
        .map_err(|_| DotmtxError::internal("ffmpeg stderr drain thread panicked"))?
        .map_err(|e| DotmtxError::encode(format!("ffmpeg stderr read failed: {e}")))?;

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr_bytes);
        return Err(DotmtxError::encode(format!(
            "ffmpeg exited with status {}: {}",
            status,
            stderr.trim()
        )));
    }
    write_result
        .map_err(|e| DotmtxError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> DotmtxResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
