use std::sync::Arc;

use crate::{
    compose::canvas::BackingCanvas,
    compose::dot_matrix::{checked_advance, compose_dot_matrix},
    config::EngineConfig,
    extract::frames::extract_frames,
    foundation::core::{Overflow, Palette},
    foundation::error::{DotmtxError, DotmtxResult},
    model::Animation,
    plan::planner::{AnimationPlan, plan_animation},
    raster::font::{MonoRasterizer, Rasterizer},
    request::RenderRequest,
};

/// Result of running the pipeline without the fallback substitution.
#[derive(Clone, Debug)]
enum Outcome {
    Rendered(Animation),
    Overflow(Overflow),
}

/// Process-wide render context: configuration, font and the fallback animation.
///
/// Built once at startup and shared by reference; rendering never mutates it, so one engine
/// can serve any number of threads.
#[derive(Debug)]
pub struct Engine<R: Rasterizer = MonoRasterizer> {
    config: EngineConfig,
    rasterizer: R,
    fallback: Arc<Animation>,
}

impl Engine<MonoRasterizer> {
    /// Engine using the configured built-in bitmap font.
    pub fn new(config: EngineConfig) -> DotmtxResult<Self> {
        let rasterizer = MonoRasterizer::new(config.font);
        Self::with_rasterizer(config, rasterizer)
    }

    /// Engine with [`EngineConfig::default`].
    pub fn with_defaults() -> DotmtxResult<Self> {
        Self::new(EngineConfig::default())
    }
}

impl<R: Rasterizer> Engine<R> {
    /// Validate `config` and pre-render the fallback animation.
    pub fn with_rasterizer(config: EngineConfig, rasterizer: R) -> DotmtxResult<Self> {
        config.validate()?;
        config.check_row_height(rasterizer.row_height())?;

        let fb = &config.fallback;
        let request = RenderRequest::new(fb.text.clone(), fb.speed, fb.width, fb.blank);
        request.validate(&config.limits)?;

        let fallback = match run_pipeline(&config, &rasterizer, &request)? {
            Outcome::Rendered(anim) => Arc::new(anim),
            Outcome::Overflow(o) => {
                return Err(DotmtxError::validation(format!(
                    "fallback animation does not fit the configured limits: {o}"
                )));
            }
        };

        Ok(Self {
            config,
            rasterizer,
            fallback,
        })
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Font used for every render.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Palette shared by every animation.
    pub fn palette(&self) -> Palette {
        Palette::LED
    }

    /// The pre-rendered animation served for oversized requests.
    pub fn fallback(&self) -> &Arc<Animation> {
        &self.fallback
    }

    /// Whether `anim` is the shared fallback (identity, not structural equality).
    pub fn is_fallback(&self, anim: &Arc<Animation>) -> bool {
        Arc::ptr_eq(anim, &self.fallback)
    }

    /// Render `request`, answering oversized requests with the fallback animation.
    ///
    /// Errors are either invalid requests or broken pipeline invariants.
    #[tracing::instrument(
        skip(self, request),
        fields(
            text_len = request.text.len(),
            speed = request.speed,
            width = request.width,
            blank = request.blank
        )
    )]
    pub fn render(&self, request: &RenderRequest) -> DotmtxResult<Arc<Animation>> {
        request.validate(&self.config.limits)?;
        match run_pipeline(&self.config, &self.rasterizer, request)? {
            Outcome::Rendered(anim) => Ok(Arc::new(anim)),
            Outcome::Overflow(o) => {
                tracing::info!(overflow = %o, "request exceeds limits, serving fallback");
                Ok(Arc::clone(&self.fallback))
            }
        }
    }

    /// Plan `request` without drawing anything; `None` when it would overflow.
    pub fn plan(&self, request: &RenderRequest) -> DotmtxResult<Option<AnimationPlan>> {
        request.validate(&self.config.limits)?;
        Ok(plan_request(&self.config, &self.rasterizer, request).ok())
    }
}

fn plan_request(
    config: &EngineConfig,
    rasterizer: &dyn Rasterizer,
    request: &RenderRequest,
) -> Result<AnimationPlan, Overflow> {
    let advance = checked_advance(rasterizer, &request.text, &config.limits, config.dots)?;
    plan_animation(
        &request.params(),
        advance,
        rasterizer.row_height(),
        rasterizer.char_width(),
        config.dots,
        config.limits.max_width,
    )
}

fn run_pipeline(
    config: &EngineConfig,
    rasterizer: &dyn Rasterizer,
    request: &RenderRequest,
) -> DotmtxResult<Outcome> {
    let dm = match compose_dot_matrix(rasterizer, &request.text, &config.limits, config.dots) {
        Ok(dm) => dm,
        Err(o) => return Ok(Outcome::Overflow(o)),
    };

    let plan = match plan_animation(
        &request.params(),
        dm.width(),
        dm.height(),
        rasterizer.char_width(),
        config.dots,
        config.limits.max_width,
    ) {
        Ok(plan) => plan,
        Err(o) => return Ok(Outcome::Overflow(o)),
    };

    let canvas = BackingCanvas::compose(&dm, &plan.layout)?;
    drop(dm);

    let frames = extract_frames(&canvas, &plan, config.parallel_extract)?;
    Ok(Outcome::Rendered(Animation {
        palette: Palette::LED,
        width: plan.layout.window_width_px,
        height: plan.layout.height_px,
        frames,
    }))
}

#[cfg(test)]
#[path = "../tests/unit/engine/engine.rs"]
mod tests;
