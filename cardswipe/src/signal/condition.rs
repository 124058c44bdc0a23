//! Sample conditioning
//!
//! Prepares a raw capture for transition detection: removes the DC bias the
//! microphone input adds, optionally stretches the waveform to full range,
//! and applies a single-pole low-pass filter that exaggerates the dominant
//! waveform shape while suppressing noise.
//!
//! All functions are pure; the input buffer is never modified.

use tracing::debug;

/// Full conditioning pass: recenter, optional rescale, smooth.
///
/// Widens 16-bit PCM samples to `i32` for arithmetic headroom. The caller
/// guarantees a non-empty buffer.
pub fn condition(samples: &[i16], smoothing: f64, silence_level: i32, rescale_pass: bool) -> Vec<i32> {
    let widened: Vec<i32> = samples.iter().map(|&s| i32::from(s)).collect();
    let recentered = recenter(&widened);
    let scaled = if rescale_pass {
        rescale(&recentered, silence_level)
    } else {
        recentered
    };
    smooth(&scaled, smoothing)
}

/// Subtract the integer mean from every sample, removing DC offset.
pub fn recenter(data: &[i32]) -> Vec<i32> {
    let sum: i64 = data.iter().map(|&v| i64::from(v)).sum();
    let avg = (sum / data.len() as i64) as i32;
    data.iter().map(|&v| v - avg).collect()
}

/// Stretch the waveform to full 16-bit range to exaggerate its shape.
///
/// Samples whose magnitude is below `silence_level` are zeroed. The scale
/// factor is the integer ratio that brings the larger excursion to the rail
/// without clipping the other. Degenerate inputs (no positive or no negative
/// excursion) keep their amplitude and only get the silence floor applied.
pub fn rescale(data: &[i32], silence_level: i32) -> Vec<i32> {
    let max = data.iter().copied().max().unwrap_or(0);
    let min = data.iter().copied().min().unwrap_or(0);

    let ratio = if max > 0 && min < 0 {
        let pos_ratio = i32::from(i16::MAX) / max;
        let neg_ratio = i32::from(i16::MIN) / min;
        pos_ratio.min(neg_ratio).max(1)
    } else {
        1
    };

    data.iter()
        .map(|&v| if v.abs() > silence_level { ratio * v } else { 0 })
        .collect()
}

/// Single-pole low-pass filter.
///
/// `out[i] = prev * smoothing + in[i] * (1 - smoothing)` where `prev` is the
/// smoothed value at `i - 1`, seeded so that `out[0] == in[0]`.
pub fn smooth(data: &[i32], smoothing: f64) -> Vec<i32> {
    debug!("smoothing data, smoothing param is {}", smoothing);
    let mut out = Vec::with_capacity(data.len());
    let mut prev = f64::from(data[0]);
    for &v in data {
        let smoothed = prev * smoothing + f64::from(v) * (1.0 - smoothing);
        out.push(smoothed as i32);
        prev = smoothed;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recenter_removes_dc_offset() {
        let data = vec![1100, 900, 1100, 900];
        let recentered = recenter(&data);
        assert_eq!(recentered, vec![100, -100, 100, -100]);
        assert_eq!(recentered.iter().sum::<i32>(), 0);
    }

    #[test]
    fn test_recenter_truncates_mean() {
        // mean of [0, 0, 5] is 1 under integer division
        let recentered = recenter(&[0, 0, 5]);
        assert_eq!(recentered, vec![-1, -1, 4]);
    }

    #[test]
    fn test_smooth_seeds_from_first_sample() {
        let data = vec![1000, 1000, 1000];
        assert_eq!(smooth(&data, 0.1), vec![1000, 1000, 1000]);
    }

    #[test]
    fn test_smooth_attenuates_spikes() {
        let data = vec![0, 10000, 0, 0];
        let smoothed = smooth(&data, 0.5);
        // out[1] = 0*0.5 + 10000*0.5 = 5000, then decays
        assert_eq!(smoothed[0], 0);
        assert_eq!(smoothed[1], 5000);
        assert_eq!(smoothed[2], 2500);
        assert_eq!(smoothed[3], 1250);
    }

    #[test]
    fn test_smooth_zero_coefficient_is_identity() {
        let data = vec![5, -7, 12, 0];
        assert_eq!(smooth(&data, 0.0), data);
    }

    #[test]
    fn test_rescale_zeroes_sub_silence_samples() {
        let data = vec![5000, -5000, 100, -100];
        let scaled = rescale(&data, 500);
        assert_eq!(scaled[2], 0);
        assert_eq!(scaled[3], 0);
        assert!(scaled[0] > 5000);
        assert!(scaled[1] < -5000);
    }

    #[test]
    fn test_rescale_does_not_clip() {
        let data = vec![10000, -2000];
        let scaled = rescale(&data, 500);
        assert!(scaled[0] <= i32::from(i16::MAX));
        assert!(scaled[1] >= i32::from(i16::MIN));
    }

    #[test]
    fn test_rescale_degenerate_input() {
        // no negative excursion: amplitude preserved, silence floor applied
        let data = vec![2000, 300, 0];
        assert_eq!(rescale(&data, 500), vec![2000, 0, 0]);
        // all zeros must not divide by zero
        assert_eq!(rescale(&[0, 0], 500), vec![0, 0]);
    }

    #[test]
    fn test_condition_pipeline() {
        let samples: Vec<i16> = vec![1100, 900, 1100, 900];
        let conditioned = condition(&samples, 0.0, 500, false);
        assert_eq!(conditioned, vec![100, -100, 100, -100]);
    }
}
