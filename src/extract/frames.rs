use rayon::prelude::*;

use crate::{
    compose::canvas::BackingCanvas,
    foundation::error::{DotmtxError, DotmtxResult},
    model::{Disposal, Frame},
    plan::planner::AnimationPlan,
};

/// Slice `canvas` into the plan's frames, in display order.
///
/// Each frame is an owned copy of its window, so the canvas can be dropped as soon as this
/// returns. With `parallel` set, frames are copied on the rayon pool; the output is identical.
pub fn extract_frames(
    canvas: &BackingCanvas,
    plan: &AnimationPlan,
    parallel: bool,
) -> DotmtxResult<Vec<Frame>> {
    if canvas.layout() != &plan.layout {
        return Err(DotmtxError::internal(
            "backing canvas was composed for a different layout",
        ));
    }

    let count = plan.frame_count();
    let frame_at = |index: u32| -> DotmtxResult<Frame> {
        Ok(Frame {
            pixels: canvas.window_at(plan.column_of(index))?,
            delay_cs: plan.delay_of(index),
            disposal: Disposal::Keep,
        })
    };

    if parallel {
        (0..count).into_par_iter().map(frame_at).collect()
    } else {
        (0..count).map(frame_at).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/frames.rs"]
mod tests;
