//! Decode orchestration
//!
//! Runs the pipeline end to end: condition the capture, estimate the
//! adaptive threshold, then try bit-recovery strategies and bit orderings
//! in a fixed priority order until one produces a good read. The fallback
//! chain is the recovery mechanism for bad reads; exhausting it yields a
//! terminal `bad_read` result, never an error.

pub mod bits;
pub mod frame;
pub mod result;

use crate::config::DecoderConfig;
use crate::decode::bits::{BitRecoverer, PeakIntervalRecoverer, ZeroCrossingRecoverer};
use crate::decode::frame::decode_frame;
use crate::decode::result::{DecodeMethod, DecodeResult, Direction, Strategy};
use crate::error::{Error, Result};
use crate::signal::condition::condition;
use crate::signal::threshold::estimate_min_level;
use tracing::debug;

/// Reverse a bit sequence (index `k` maps to `len - 1 - k`).
fn reverse_bits(bits: &[bool]) -> Vec<bool> {
    bits.iter().rev().copied().collect()
}

/// Swipe decoder: a validated configuration and no other state.
///
/// All working state (threshold, interval estimates, discard counters) is
/// local to one [`Decoder::decode`] call, so a single `Decoder` can serve
/// concurrent decodes of independent buffers.
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder, validating the configuration first.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one complete captured swipe.
    ///
    /// Attempts, in priority order, stopping at the first good read:
    ///
    /// 1. peak-interval recovery, forward
    /// 2. the same bit sequence, reversed
    /// 3. zero-crossing recovery, forward
    /// 4. the same bit sequence, reversed
    ///
    /// If every attempt is a bad read, the last attempt's result is
    /// returned as the terminal outcome. The only error is an empty input
    /// buffer.
    pub fn decode(&self, samples: &[i16]) -> Result<DecodeResult> {
        if samples.is_empty() {
            return Err(Error::EmptyInput);
        }

        let conditioned = condition(
            samples,
            self.config.smoothing,
            self.config.silence_level,
            self.config.rescale,
        );
        let min_level = estimate_min_level(
            &conditioned,
            self.config.silence_level,
            self.config.min_level_coeff,
        );
        debug!("decoding {} samples, min level {}", samples.len(), min_level);

        let strategies: [(&dyn BitRecoverer, Strategy); 2] = [
            (&PeakIntervalRecoverer, Strategy::PeakInterval),
            (&ZeroCrossingRecoverer, Strategy::ZeroCrossing),
        ];

        // overwritten by the first attempt
        let mut last = DecodeResult::new();
        last.set_content("unevaluated swipe");
        last.set_bad_read();

        for (recoverer, strategy) in strategies {
            let recovered = recoverer.recover(&conditioned, min_level);
            debug!(
                "{}: {} bits recovered{}",
                recoverer.name(),
                recovered.bits.len(),
                if recovered.framing_stop { " (framing stop)" } else { "" },
            );
            for direction in [Direction::Forward, Direction::Reversed] {
                let ordered = match direction {
                    Direction::Forward => recovered.bits.clone(),
                    Direction::Reversed => reverse_bits(&recovered.bits),
                };
                let mut attempt = decode_frame(&ordered);
                attempt.method = Some(DecodeMethod { strategy, direction });
                if !attempt.is_bad_read() {
                    debug!("good read via {} {:?}", recoverer.name(), direction);
                    attempt.raw = samples.to_vec();
                    return Ok(attempt);
                }
                debug!("bad read via {} {:?}", recoverer.name(), direction);
                last = attempt;
            }
        }

        last.raw = samples.to_vec();
        Ok(last)
    }
}
