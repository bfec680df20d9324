use crate::{
    compose::canvas::CanvasLayout,
    foundation::core::{DotGeometry, Overflow},
};

/// Largest delay, in centiseconds, a GIF frame can carry.
pub const MAX_DELAY_CS: f64 = u16::MAX as f64;
/// Shortest non-zero delay; faster frames are unreliable across GIF renderers.
pub const MIN_DELAY_CS: f64 = 2.0;

/// User-facing animation parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanParams {
    /// Characters scrolled per second; negative scrolls right-to-left, zero is static.
    pub speed: f64,
    /// Window width as a multiple of the text width.
    pub width: f64,
    /// Trailing blank run as a multiple of the text width.
    pub blank: f64,
}

/// Which way the window moves across the backing canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Window moves right, text appears to move left.
    Forward,
    /// Window moves left, text appears to move right.
    Reverse,
}

impl ScrollDirection {
    /// Column increment per frame.
    pub fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// Consecutive all-blank window positions `[start, end)` collapsed into one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BlankRun {
    /// First collapsed column.
    pub start: i64,
    /// One past the last collapsed column.
    pub end: i64,
    /// Number of collapsed positions, `end - start`.
    pub count: u32,
}

/// Timing of a scrolling animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScrollPlan {
    /// Scroll direction.
    pub direction: ScrollDirection,
    /// Column shown by the first frame.
    pub start_column: u32,
    /// Delay of every frame but the last, in centiseconds.
    pub delay_cs: u32,
    /// Delay of the last frame; stretched to cover a collapsed blank run.
    pub last_delay_cs: u32,
    /// Frames after blank-run collapse.
    pub frame_count: u32,
    /// Collapsed blank positions, if any.
    pub blank_run: Option<BlankRun>,
}

/// Frame timing of a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timing {
    /// One frame at column 0 with delay 0.
    Static,
    /// Window scrolls across the period.
    Scroll(ScrollPlan),
}

/// Everything the extractor needs to slice a backing canvas into frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationPlan {
    /// Width multiplier after clamping.
    pub width_mult: f64,
    /// Blank multiplier after the static recompute.
    pub blank_mult: f64,
    /// Canvas and window geometry.
    pub layout: CanvasLayout,
    /// Frame timing.
    pub timing: Timing,
}

impl AnimationPlan {
    /// Number of frames, at least 1.
    pub fn frame_count(&self) -> u32 {
        match &self.timing {
            Timing::Static => 1,
            Timing::Scroll(s) => s.frame_count,
        }
    }

    /// Delay of every frame but the last; 0 when static.
    pub fn base_delay_cs(&self) -> u32 {
        match &self.timing {
            Timing::Static => 0,
            Timing::Scroll(s) => s.delay_cs,
        }
    }

    /// Delay of frame `index`; the last frame carries the blank-run delay.
    pub fn delay_of(&self, index: u32) -> u32 {
        match &self.timing {
            Timing::Static => 0,
            Timing::Scroll(s) if index + 1 == s.frame_count => s.last_delay_cs,
            Timing::Scroll(s) => s.delay_cs,
        }
    }

    /// Canvas column shown by frame `index`, wrapped into `[0, backing_columns)`.
    pub fn column_of(&self, index: u32) -> u32 {
        match &self.timing {
            Timing::Static => 0,
            Timing::Scroll(s) => {
                let period = i64::from(self.layout.backing_columns);
                let column =
                    i64::from(s.start_column) + i64::from(index) * s.direction.step();
                column.rem_euclid(period) as u32
            }
        }
    }
}

/// Clamp the width multiplier to one cycle and, for static output, shrink the blank run to
/// what the clamped window needs.
///
/// The order matters: the static recompute sees the already clamped width.
pub fn clamp_multipliers(params: &PlanParams) -> (f64, f64) {
    let width = params.width.min(1.0 + params.blank);
    let blank = if params.speed == 0.0 {
        (width - 1.0).max(0.0)
    } else {
        params.blank
    };
    (width, blank)
}

/// Per-frame delay in centiseconds for one dot of scroll.
///
/// Non-finite, negative or oversized delays collapse to 0 (static output); anything else is
/// rounded and floored at [`MIN_DELAY_CS`].
pub fn frame_delay_cs(speed: f64, char_width: u32) -> u32 {
    let speed = speed.abs();
    if speed == 0.0 {
        return 0;
    }
    let delay = 100.0 / (speed * f64::from(char_width));
    if !delay.is_finite() || delay < 0.0 || delay > MAX_DELAY_CS {
        return 0;
    }
    if delay == 0.0 {
        return 0;
    }
    delay.round().max(MIN_DELAY_CS) as u32
}

/// Plan how the window scrolls across the backing canvas of a `dot_matrix_width x rows` text.
pub fn plan_animation(
    params: &PlanParams,
    dot_matrix_width: u32,
    rows: u32,
    char_width: u32,
    dots: DotGeometry,
    max_width: u32,
) -> Result<AnimationPlan, Overflow> {
    let (width_mult, blank_mult) = clamp_multipliers(params);
    let layout = CanvasLayout::compute(
        dot_matrix_width,
        rows,
        width_mult,
        blank_mult,
        dots,
        max_width,
    )?;

    let delay = frame_delay_cs(params.speed, char_width);
    let timing = if delay == 0 || layout.backing_columns == 0 {
        Timing::Static
    } else {
        let direction = if params.speed < 0.0 {
            ScrollDirection::Reverse
        } else {
            ScrollDirection::Forward
        };
        Timing::Scroll(scroll_plan(&layout, direction, delay))
    };

    tracing::debug!(
        width_mult,
        blank_mult,
        window_columns = layout.window_columns,
        backing_columns = layout.backing_columns,
        canvas_width = layout.width_px,
        ?timing,
        "planned animation"
    );

    Ok(AnimationPlan {
        width_mult,
        blank_mult,
        layout,
        timing,
    })
}

fn scroll_plan(layout: &CanvasLayout, direction: ScrollDirection, delay: u32) -> ScrollPlan {
    let text = i64::from(layout.dot_matrix_width);
    let window = i64::from(layout.window_columns);
    let backing = i64::from(layout.backing_columns);

    let (start, range_start, range_end) = match direction {
        ScrollDirection::Forward => {
            let start = text.max(backing - window);
            (start, text, start)
        }
        ScrollDirection::Reverse => {
            let start = backing.min(text + window) - window;
            (start, start + 1, backing - window + 1)
        }
    };

    let blank_count = (range_end - range_start).max(0) as u32;
    let mut frame_count = layout.backing_columns;
    let mut last_delay = delay;
    let mut blank_run = None;
    if blank_count > 0 {
        frame_count -= blank_count - 1;
        last_delay = delay.saturating_mul(blank_count);
        blank_run = Some(BlankRun {
            start: range_start,
            end: range_end,
            count: blank_count,
        });
    }

    ScrollPlan {
        direction,
        start_column: start.rem_euclid(backing) as u32,
        delay_cs: delay,
        last_delay_cs: last_delay,
        frame_count,
        blank_run,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/planner.rs"]
mod tests;
