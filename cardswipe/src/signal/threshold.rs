//! Adaptive threshold estimation
//!
//! Swipe speed and signal strength vary between captures, so a fixed
//! amplitude threshold either drops weak transitions or admits noise. One
//! scan over the conditioned samples measures the average qualifying peak
//! between zero crossings; a configured fraction of that average becomes the
//! decode threshold for the rest of the pipeline.

use tracing::debug;

/// Estimate the minimum signal level for transition detection.
///
/// Tracks the highest local maximum between each negative-to-positive zero
/// crossing and the following positive-to-negative crossing. A candidate
/// only qualifies if some sample rose above `silence_level` and then fell
/// (the local-maximum test), which keeps flat noise from counting as peaks.
///
/// Returns `floor(avg_peak * coeff)`, or `silence_level` when no peak
/// qualifies (insufficient signal falls back, it is not an error).
pub fn estimate_min_level(data: &[i32], silence_level: i32, coeff: f64) -> i32 {
    let mut last_val = 0i32;
    let mut peak_count = 0i64;
    let mut peak_sum = 0i64;
    // highest peak value seen since the last upward zero crossing
    let mut peak_candidate = 0i32;
    let mut hit_max = false;

    for &val in data {
        if val > 0 && last_val <= 0 {
            // coming from negative to positive, reset the candidate
            peak_candidate = 0;
            hit_max = false;
        } else if val < 0 && last_val >= 0 && hit_max {
            // going from positive to negative, bank the candidate
            peak_sum += i64::from(peak_candidate);
            peak_count += 1;
        }
        if val > 0 && last_val > val && last_val > silence_level && val > peak_candidate {
            // just past a local maximum that cleared the silence floor
            hit_max = true;
            peak_candidate = val;
        }
        last_val = val;
    }

    if peak_count > 0 {
        let level = ((peak_sum / peak_count) as f64 * coeff).floor() as i32;
        debug!("{} qualifying peaks, min level {}", peak_count, level);
        level
    } else {
        debug!("no qualifying peaks, falling back to silence level {}", silence_level);
        silence_level
    }
}
