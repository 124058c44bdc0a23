//! # Cardswipe
//!
//! Recover the text encoded on a magnetic-stripe card from an audio
//! waveform captured through a microphone-input swipe reader.
//!
//! The stripe signal is F2F (Aiken biphase): self-clocking, with one
//! transition interval per 0 bit and two half-duration intervals per 1 bit.
//! The pipeline conditions the raw samples, estimates an adaptive
//! amplitude threshold, recovers bits from transition timing, and decodes
//! sentinel-anchored characters with parity checking. When an attempt
//! fails, the orchestrator retries with the alternate bit-recovery
//! strategy and with the bit sequence reversed (cards swipe both ways).
//!
//! Decoding is a synchronous, pure computation over a complete captured
//! buffer; capture itself is the caller's concern.
//!
//! # Example
//!
//! ```no_run
//! # fn samples_from_somewhere() -> Vec<i16> { Vec::new() }
//! let samples: Vec<i16> = samples_from_somewhere();
//! let result = cardswipe::decode(&samples)?;
//! if result.bad_read {
//!     println!("swipe could not be decoded");
//! } else {
//!     println!("{} ({} suspect chars)", result.content, result.bad_char_indices.len());
//! }
//! # Ok::<(), cardswipe::Error>(())
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod signal;

pub use config::DecoderConfig;
pub use decode::result::{DecodeMethod, DecodeResult, Direction, Strategy};
pub use decode::Decoder;
pub use error::{Error, Result};

/// Decode a captured swipe with the default configuration.
pub fn decode(samples: &[i16]) -> Result<DecodeResult> {
    Decoder::new(DecoderConfig::default())?.decode(samples)
}
