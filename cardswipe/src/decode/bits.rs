//! Self-clocking bit recovery
//!
//! The stripe encodes data as F2F (Aiken biphase): a logical 0 is one
//! transition interval, a logical 1 is two consecutive intervals of roughly
//! half that duration. There is no external clock; the running `one_interval`
//! estimate adapts to swipe speed as transitions arrive.
//!
//! Two interchangeable transition sources feed the same recovery loop:
//! zero crossings of the conditioned samples, or alternating-sign peaks.
//! They differ only in how the `one_interval` estimate is updated, so the
//! classification contract lives in one place ([`recover_bits`]).

use crate::signal::peaks::extract_peaks;
use tracing::{debug, trace};

/// Number of leading transition intervals discarded as self-clocking
/// preamble before the interval estimate is seeded.
const INTRO_DISCARD: usize = 1;

/// Outcome of one bit-recovery pass.
///
/// `framing_stop` reports that recovery ended early because a full-period
/// interval arrived while the second half of a 1 was pending. That is a
/// normal termination (the swipe ran into noise), never an error; the bits
/// accumulated so far are still returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredBits {
    /// Recovered bits in chronological order
    pub bits: Vec<bool>,

    /// True when recovery stopped on a framing violation
    pub framing_stop: bool,
}

/// How the running `one_interval` estimate tracks observed intervals.
#[derive(Debug, Clone, Copy)]
enum IntervalUpdate {
    /// Replace the estimate on every classified interval (zero-crossing
    /// source): `d` for a half interval, `d / 2` for a full one.
    Replace,

    /// Average the estimate toward the observation, only when a bit is
    /// emitted (peak source): `(est + d) / 2` on a 1, `(est + d/2) / 2`
    /// on a 0.
    Averaged,
}

/// Nearest-match interval classification.
///
/// True when `d` is closer to the half-period estimate than to the full
/// period. Strictly less-than: an exact tie classifies as "not one".
pub fn is_one(d: i64, one_interval: i64) -> bool {
    (d - one_interval).abs() < (d - 2 * one_interval).abs()
}

/// Convert a sequence of transition positions into logical bits.
///
/// Discards [`INTRO_DISCARD`] leading intervals, seeds `one_interval` from
/// half of the next, then classifies every following interval. All state is
/// local to this call.
fn recover_bits(transitions: &[usize], update: IntervalUpdate) -> RecoveredBits {
    let mut bits = Vec::new();
    let mut framing_stop = false;
    let mut one_interval: Option<i64> = None;
    let mut need_half_one = false;
    let mut discarded = 0usize;

    for pair in transitions.windows(2) {
        let d = (pair[1] - pair[0]) as i64;
        if discarded < INTRO_DISCARD {
            discarded += 1;
            continue;
        }
        let one = match one_interval {
            None => {
                one_interval = Some(d / 2);
                continue;
            }
            Some(one) => one,
        };

        let half = is_one(d, one);
        trace!("diff: {} one_interval: {} idx: {} one?: {}", d, one, pair[1], half);
        if half {
            if let IntervalUpdate::Replace = update {
                one_interval = Some(d);
            }
            if need_half_one {
                if let IntervalUpdate::Averaged = update {
                    one_interval = Some((one + d) / 2);
                }
                bits.push(true);
                need_half_one = false;
            } else {
                need_half_one = true;
            }
        } else {
            if let IntervalUpdate::Replace = update {
                one_interval = Some(d / 2);
            }
            if need_half_one {
                // got a full period where the second half of a 1 was due
                debug!("framing stop after {} bits", bits.len());
                framing_stop = true;
                break;
            }
            if let IntervalUpdate::Averaged = update {
                one_interval = Some((one + d / 2) / 2);
            }
            bits.push(false);
        }
    }

    RecoveredBits { bits, framing_stop }
}

/// A strategy turning conditioned samples into a logical bit sequence.
///
/// Implementations must satisfy the F2F contract of [`recover_bits`]; they
/// choose the transition-event source.
pub trait BitRecoverer {
    /// Short name for logging
    fn name(&self) -> &'static str;

    /// Recover bits from conditioned samples using `min_level` as the
    /// transition qualification threshold.
    fn recover(&self, samples: &[i32], min_level: i32) -> RecoveredBits;
}

/// Transition events are sign alternations of the samples themselves.
///
/// The sign state starts negative, so the first qualifying event is a
/// positive excursion; each event flips the expected sign.
pub struct ZeroCrossingRecoverer;

impl BitRecoverer for ZeroCrossingRecoverer {
    fn name(&self) -> &'static str {
        "zero-crossing"
    }

    fn recover(&self, samples: &[i32], min_level: i32) -> RecoveredBits {
        let mut transitions = Vec::new();
        let mut last_sign = -1i32;
        for (i, &dp) in samples.iter().enumerate() {
            if dp * last_sign < 0 && dp.abs() > min_level {
                transitions.push(i);
                last_sign = -last_sign;
            }
        }
        debug!("{} zero-crossing transitions", transitions.len());
        recover_bits(&transitions, IntervalUpdate::Replace)
    }
}

/// Transition events are peaks whose sign differs from the previous
/// accepted peak; same-sign peaks are ignored without updating state.
pub struct PeakIntervalRecoverer;

impl BitRecoverer for PeakIntervalRecoverer {
    fn name(&self) -> &'static str {
        "peak-interval"
    }

    fn recover(&self, samples: &[i32], min_level: i32) -> RecoveredBits {
        let peaks = extract_peaks(samples, min_level);
        let mut transitions = Vec::with_capacity(peaks.len());
        let mut iter = peaks.iter();
        if let Some(first) = iter.next() {
            let mut last = first;
            transitions.push(first.index);
            for peak in iter {
                if !peak.same_sign(last) {
                    transitions.push(peak.index);
                    last = peak;
                }
            }
        }
        debug!("{} alternating-sign peak transitions", transitions.len());
        recover_bits(&transitions, IntervalUpdate::Averaged)
    }
}
