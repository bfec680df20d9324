/// Accept `v` as a pixel extent only when it is finite, non-negative and `<= max`.
pub(crate) fn bounded_extent(v: f64, max: u32) -> Option<u32> {
    if v.is_finite() && v >= 0.0 && v <= f64::from(max) {
        Some(v as u32)
    } else {
        None
    }
}

/// `ceil(mult * n)`, kept in floating point so overflow shows up as a non-finite value.
pub(crate) fn ceil_columns(mult: f64, n: u32) -> f64 {
    (mult * f64::from(n)).ceil()
}

pub(crate) fn gcd_u32(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
