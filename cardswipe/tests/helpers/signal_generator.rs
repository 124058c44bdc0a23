//! Deterministic F2F swipe-signal synthesis
//!
//! Generates the audio a swipe reader head produces: one voltage pulse of
//! alternating polarity per flux transition. A 0 bit is one full-period
//! interval between transitions, a 1 bit two half-period intervals. The
//! encoded text is framed the way real cards are: self-clocking preamble
//! zeros, start sentinel, data characters with odd parity, end sentinel,
//! trailing zeros.
//!
//! Everything is deterministic so failures reproduce exactly.

/// Track format parameters for encoding test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestTrack {
    /// 6 data bits + parity, base 32, start sentinel `'%'`
    Track1,
    /// 4 data bits + parity, base 48, start sentinel `';'`
    Track2,
}

impl TestTrack {
    fn data_bits(self) -> usize {
        match self {
            TestTrack::Track1 => 6,
            TestTrack::Track2 => 4,
        }
    }

    fn base_char(self) -> u8 {
        match self {
            TestTrack::Track1 => 32,
            TestTrack::Track2 => 48,
        }
    }
}

/// A logical swipe ready for synthesis.
///
/// Keeping the bit layer visible lets tests corrupt individual bits (for
/// parity fault injection) before rendering samples.
#[derive(Debug, Clone)]
pub struct SwipeSignal {
    /// Framed bit sequence: preamble zeros, characters, trailing zeros
    pub bits: Vec<bool>,

    /// Bit index where character data starts (end of the preamble)
    pub data_start: usize,
}

impl SwipeSignal {
    /// Flip the parity bit of the character at `char_index`.
    pub fn flip_parity_bit(&mut self, track: TestTrack, char_index: usize) {
        let group = track.data_bits() + 1;
        let i = self.data_start + char_index * group + track.data_bits();
        self.bits[i] = !self.bits[i];
    }
}

/// Encode `text` for `track`, framed with preamble and trailing zeros.
///
/// Panics (test helper) if a character is outside the track's code range.
pub fn encode_text(text: &str, track: TestTrack, preamble_zeros: usize) -> SwipeSignal {
    let mut bits = vec![false; preamble_zeros];
    let data_start = bits.len();
    for ch in text.chars() {
        let code = ch as u32;
        let base = u32::from(track.base_char());
        let span = 1 << track.data_bits();
        assert!(
            code >= base && code < base + span,
            "character {ch:?} not encodable on {track:?}"
        );
        let value = code - base;
        let mut ones = 0;
        for exp in 0..track.data_bits() {
            let bit = value & (1 << exp) != 0;
            if bit {
                ones += 1;
            }
            bits.push(bit);
        }
        // odd parity over data bits + parity bit
        bits.push(ones % 2 == 0);
    }
    bits.extend(std::iter::repeat(false).take(4));
    SwipeSignal { bits, data_start }
}

/// Render a bit sequence as 16-bit PCM samples.
///
/// `full_period` is the 0-bit transition interval in samples; 1 bits use
/// two half intervals. Each transition becomes a half-sine pulse of
/// alternating polarity (the head signal of a flux reversal), first pulse
/// positive. `dc_offset` shifts every sample to exercise recentering.
pub fn synthesize(signal: &SwipeSignal, full_period: usize, amplitude: i16, dc_offset: i16) -> Vec<i16> {
    const PULSE_WIDTH: usize = 10;
    const MARGIN: usize = 100;
    assert!(full_period / 2 > PULSE_WIDTH, "pulses must not overlap");

    // transition times: one at every cell boundary, an extra mid-cell per 1
    let mut transitions = vec![MARGIN];
    let mut at = MARGIN;
    for &bit in &signal.bits {
        if bit {
            at += full_period / 2;
            transitions.push(at);
            at += full_period / 2;
            transitions.push(at);
        } else {
            at += full_period;
            transitions.push(at);
        }
    }

    let pulse: Vec<f64> = (0..PULSE_WIDTH)
        .map(|k| {
            let phase = std::f64::consts::PI * (k as f64 + 1.0) / (PULSE_WIDTH as f64 + 1.0);
            f64::from(amplitude) * phase.sin()
        })
        .collect();

    let mut samples = vec![0f64; at + MARGIN];
    for (i, &t) in transitions.iter().enumerate() {
        let polarity = if i % 2 == 0 { 1.0 } else { -1.0 };
        let start = t - PULSE_WIDTH / 2;
        for (k, &p) in pulse.iter().enumerate() {
            samples[start + k] += polarity * p;
        }
    }

    samples
        .into_iter()
        .map(|s| (s as i32 + i32::from(dc_offset)).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
        .collect()
}
