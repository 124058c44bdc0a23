//! Peak extraction
//!
//! A peak is a positive maximum or a negative minimum whose magnitude
//! clears the decode threshold. Peaks are the transition-event source for
//! the peak-interval bit recovery strategy.

use tracing::debug;

/// A qualifying local extremum in the sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    /// Index into the samples where this peak was detected
    pub index: usize,

    /// Sample value at the extremum
    pub value: i32,
}

impl Peak {
    pub fn is_positive(&self) -> bool {
        self.value > 0
    }

    pub fn same_sign(&self, other: &Peak) -> bool {
        self.is_positive() == other.is_positive()
    }
}

/// Extract all peaks above `threshold` from the conditioned samples.
///
/// Walks the sequence with a 2-sample lookback. Samples below threshold are
/// skipped entirely and do not enter the lookback state; the magnitude gate
/// doubles as noise rejection. The recorded peak pairs the extremum value
/// with the index of the sample that revealed it (one past the extremum).
pub fn extract_peaks(data: &[i32], threshold: i32) -> Vec<Peak> {
    let mut peaks = Vec::new();
    let mut last_dp = 0i32;
    let mut before_that_dp = 0i32;

    for (i, &dp) in data.iter().enumerate() {
        if dp.abs() < threshold {
            // not a great enough level, min/max does not matter
            continue;
        }

        if dp > 0 && dp < last_dp && last_dp >= before_that_dp {
            // positive maximum
            peaks.push(Peak { index: i, value: last_dp });
        } else if dp < 0 && dp > last_dp && last_dp <= before_that_dp {
            // negative minimum
            peaks.push(Peak { index: i, value: last_dp });
        }

        before_that_dp = last_dp;
        last_dp = dp;
    }

    debug!("got {} peaks", peaks.len());
    peaks
}
