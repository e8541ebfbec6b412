//! Timing math for a pass.

use std::time::Duration;

use num_traits::Float;

/// Cubic ease-out, fast at first and slowing to a stop at 1.
pub fn ease_out_cubic<T: Float>(progress: T) -> T {
    let inv = T::one() - progress;
    T::one() - inv * inv * inv
}

/// How far through a pass of length `duration` we are, clamped to 0..=1.
/// Worked out from wall clock time so dropped frames don't slow the pass down.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }

    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// Value shown for a cell moving from `start` to `target`, `eased` of the way there.
pub fn interpolate(start: i32, target: i32, eased: f64) -> i32 {
    (start as f64 + (target - start) as f64 * eased).round() as i32
}
