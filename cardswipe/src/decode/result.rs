//! Decode result types
//!
//! A [`DecodeResult`] is created fresh for every decode attempt and is
//! immutable once returned. A bad read is a result state, not an error:
//! `bad_read` means no usable content was produced (the content may still
//! hold a diagnostic placeholder).

use serde::Serialize;
use std::fmt;

/// Which bit-recovery strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    PeakInterval,
    ZeroCrossing,
}

/// Whether the bit sequence was consumed in signal order or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Forward,
    Reversed,
}

/// Strategy and bit order of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodeMethod {
    pub strategy: Strategy,
    pub direction: Direction,
}

impl fmt::Display for DecodeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            Strategy::PeakInterval => "peak-interval",
            Strategy::ZeroCrossing => "zero-crossing",
        };
        let direction = match self.direction {
            Direction::Forward => "forward",
            Direction::Reversed => "reversed",
        };
        write!(f, "{strategy} {direction}")
    }
}

/// Outcome of decoding one captured swipe.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeResult {
    /// Decoded text, including the start and end sentinel characters
    pub content: String,

    /// 0-based positions into `content` whose parity check failed,
    /// in increasing order
    pub bad_char_indices: Vec<usize>,

    /// True when no usable content was produced
    pub bad_read: bool,

    /// The original sample sequence the result was decoded from
    #[serde(skip_serializing)]
    pub raw: Vec<i16>,

    /// Strategy and direction of the attempt that produced this result;
    /// `None` until an attempt has run
    pub method: Option<DecodeMethod>,
}

impl DecodeResult {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            bad_char_indices: Vec::new(),
            bad_read: false,
            raw: Vec::new(),
            method: None,
        }
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    pub fn add_bad_char_index(&mut self, i: usize) {
        self.bad_char_indices.push(i);
    }

    pub fn set_bad_read(&mut self) {
        self.bad_read = true;
    }

    pub fn is_bad_read(&self) -> bool {
        self.bad_read
    }
}

impl Default for DecodeResult {
    fn default() -> Self {
        Self::new()
    }
}
