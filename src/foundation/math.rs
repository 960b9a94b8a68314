use std::time::Duration;

/// `v` when finite, `fallback` otherwise.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// Clamp a percentage into `[0, 100]`. NaN maps to 0.
pub(crate) fn clamp_percentage(p: f64) -> f64 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 100.0)
}

/// Floor a non-negative quantity into a count. Negative and NaN inputs give 0.
pub(crate) fn floor_count(x: f64) -> usize {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }
    // `as` saturates at usize::MAX for +inf.
    x.floor() as usize
}

/// Seconds to [`Duration`], saturating; negative or NaN gives zero.
pub(crate) fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
