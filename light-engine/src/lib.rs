#![no_std]

//! Adaptive spectral-to-light mapping.
//!
//! Each audio frame is windowed, transformed and reduced to one intensity per
//! light. Per light, a self-calibrating envelope tracks the range of recent
//! intensities, the intensity is mapped through it to `[0, 1]`, smoothed with
//! a fast-attack / slow-release filter and quantized to a brightness byte for
//! the serial light controller.
//!
//! ```ignore
//! let mut engine = Engine::<2048, 8>::new(EngineConfig::reference())?;
//! let mut state = engine.initial_state();
//! loop {
//!     engine.run_frame(&mut state, &mut microphone, &mut RealFft, &mut serial)?;
//! }
//! ```

pub mod band_map;
pub mod binner;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod protocol;
pub mod quantizer;
pub mod range_tracker;
pub mod smoother;
pub mod state;

pub use band_map::{BandMap, BandMapError, BandSpread};
pub use binner::{bin_spectrum, BinSummary};
pub use config::{EngineConfig, REFERENCE_CHANNELS, REFERENCE_FRAME_LEN};
pub use engine::{Engine, FrameReport};
pub use error::{ConfigError, PipelineError};
pub use normalizer::{Normalized, Normalizer, NormalizerConfig};
pub use pipeline::{send_report, FrameSource, LightSink};
pub use protocol::{LightMessage, ProtocolConfig};
pub use quantizer::Quantizer;
pub use range_tracker::{RangeConfig, RangeSeed, RangeTracker};
pub use smoother::{Smoother, SmoothingConfig};
pub use state::{ChannelState, EngineState, Envelope};

pub use light_dsp::{Complex32, RealFft, SpectrumTransform, TransformError};

/// The engine with the reference frame length and channel count.
pub type ReferenceEngine = Engine<REFERENCE_FRAME_LEN, REFERENCE_CHANNELS>;
