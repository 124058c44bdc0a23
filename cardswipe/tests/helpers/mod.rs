//! Test helper modules for cardswipe integration tests
//!
//! Provides a deterministic F2F signal generator so pipeline tests can run
//! against buffers shaped like real swipe captures without any hardware.

pub mod signal_generator;

pub use signal_generator::{encode_text, synthesize, SwipeSignal, TestTrack};
