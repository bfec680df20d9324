use std::str::FromStr;

use crate::{
    config::Limits,
    foundation::error::DotmtxError,
    plan::planner::PlanParams,
};

/// Why a request was rejected. Messages are meant to be shown to the requester as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// Fewer than four fields, or no text.
    #[error("some parameters are missing: expected [Speed] [Width] [Blank] [Text]")]
    NotEnoughParams,

    /// A number failed to parse or is out of range.
    #[error(
        "invalid parameters: [Speed], [Width] and [Blank] must be numbers, [Width] must be greater than zero and [Blank] must not be negative"
    )]
    InvalidParams,

    /// Text longer than the configured limit.
    #[error("[Text] is too long: the limit is {max} bytes")]
    TextTooLong {
        /// Limit in bytes.
        max: usize,
    },
}

impl From<RequestError> for DotmtxError {
    fn from(e: RequestError) -> Self {
        DotmtxError::validation(e.to_string())
    }
}

/// A single render request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Text to scroll.
    pub text: String,
    /// Characters per second; negative scrolls the other way, zero is static.
    pub speed: f64,
    /// Window width as a multiple of the text width.
    pub width: f64,
    /// Trailing blank as a multiple of the text width.
    pub blank: f64,
}

impl RenderRequest {
    /// Request without validation; see [`RenderRequest::validate`].
    pub fn new(text: impl Into<String>, speed: f64, width: f64, blank: f64) -> Self {
        Self {
            text: text.into(),
            speed,
            width,
            blank,
        }
    }

    /// Numeric parameters as planner input.
    pub fn params(&self) -> PlanParams {
        PlanParams {
            speed: self.speed,
            width: self.width,
            blank: self.blank,
        }
    }

    /// Check the input contract: finite numbers, `width > 0`, `blank >= 0`, bounded text.
    pub fn validate(&self, limits: &Limits) -> Result<(), RequestError> {
        let numbers_ok = self.speed.is_finite()
            && self.width.is_finite()
            && self.width > 0.0
            && self.blank.is_finite()
            && self.blank >= 0.0;
        if !numbers_ok {
            return Err(RequestError::InvalidParams);
        }
        if self.text.len() > limits.max_text_len {
            return Err(RequestError::TextTooLong {
                max: limits.max_text_len,
            });
        }
        Ok(())
    }

    /// Parse and validate a one-line `[Speed] [Width] [Blank] [Text]` query.
    pub fn parse(query: &str, limits: &Limits) -> Result<Self, RequestError> {
        let req: RenderRequest = query.parse()?;
        req.validate(limits)?;
        Ok(req)
    }
}

/// Split off one whitespace-delimited token, returning it and the untouched remainder.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

impl FromStr for RenderRequest {
    type Err = RequestError;

    /// Syntax only; limits are checked by [`RenderRequest::parse`].
    ///
    /// The text is everything after the whitespace that follows the third number, trailing
    /// whitespace included. When only whitespace follows, the separator keeps one character
    /// and the last one becomes the text. Text may not contain a line break.
    fn from_str(query: &str) -> Result<Self, Self::Err> {
        let (speed, rest) = next_token(query).ok_or(RequestError::NotEnoughParams)?;
        let (width, rest) = next_token(rest).ok_or(RequestError::NotEnoughParams)?;
        let (blank, rest) = next_token(rest).ok_or(RequestError::NotEnoughParams)?;

        if !rest.starts_with(char::is_whitespace) {
            return Err(RequestError::NotEnoughParams);
        }
        let text = match rest.trim_start() {
            "" => match rest.char_indices().last() {
                Some((i, _)) if i > 0 => &rest[i..],
                _ => return Err(RequestError::NotEnoughParams),
            },
            text => text,
        };
        if text.contains('\n') {
            return Err(RequestError::NotEnoughParams);
        }

        let number = |s: &str| s.parse::<f64>().map_err(|_| RequestError::InvalidParams);
        let req = RenderRequest::new(text, number(speed)?, number(width)?, number(blank)?);

        if !(req.width > 0.0) || !(req.blank >= 0.0) {
            return Err(RequestError::InvalidParams);
        }
        Ok(req)
    }
}

#[cfg(test)]
#[path = "../tests/unit/request/request.rs"]
mod tests;
