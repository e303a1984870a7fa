use crate::band_map::BandSpread;
use crate::binner::BinSummary;
use crate::error::ConfigError;
use crate::normalizer::NormalizerConfig;
use crate::protocol::ProtocolConfig;
use crate::range_tracker::{RangeConfig, RangeSeed};
use crate::smoother::SmoothingConfig;

// --- Pipeline Config ---
pub const REFERENCE_FRAME_LEN: usize = 2048; // Samples per frame (FFT size)
pub const REFERENCE_CHANNELS: usize = 8; // Lights driven by the sink
pub const REFERENCE_FIRST_BIN: usize = 2; // Bins 0 and 1 (DC, near-DC) are skipped
pub const REFERENCE_BAND_WIDTH: usize = 3; // Bins per channel

// --- Range Tracker Config ---
pub const DECAY_LOW_RATE: f32 = 0.00001;
pub const DECAY_HIGH_RATE: f32 = 0.0001;
pub const RANGE_LOW_SENTINEL: f32 = f32::MAX;

// --- Normalizer Config ---
pub const NORMALIZED_OUT_LOW: f32 = -0.2;
pub const NORMALIZED_OUT_HIGH: f32 = 1.5;
pub const MIN_ENVELOPE_WIDTH: f32 = 1e-6;

// --- Smoother Config ---
pub const ATTACK_RETAIN: f32 = 0.5;
pub const RELEASE_RETAIN: f32 = 0.97;

// --- Sink Protocol Config ---
pub const MAX_HEADER: u8 = 255;
pub const MAX_BRIGHTNESS: u8 = 247; // 248..=255 are header bytes

/// Static configuration of the whole pipeline, fixed at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct EngineConfig<const C: usize> {
    pub bands: BandSpread,
    pub summary: BinSummary,
    pub range: RangeConfig<C>,
    pub normalizer: NormalizerConfig,
    pub smoothing: SmoothingConfig,
    pub protocol: ProtocolConfig,
}

impl<const C: usize> EngineConfig<C> {
    pub const fn reference() -> Self {
        Self {
            bands: BandSpread::Contiguous {
                first_bin: REFERENCE_FIRST_BIN,
                width: REFERENCE_BAND_WIDTH,
            },
            summary: BinSummary::Sum,
            range: RangeConfig {
                decay_low: DECAY_LOW_RATE,
                decay_high: DECAY_HIGH_RATE,
                seed: RangeSeed::Sentinel,
                auto_expand: true,
            },
            normalizer: NormalizerConfig {
                out_low: NORMALIZED_OUT_LOW,
                out_high: NORMALIZED_OUT_HIGH,
                min_width: MIN_ENVELOPE_WIDTH,
            },
            smoothing: SmoothingConfig {
                attack: ATTACK_RETAIN,
                release: RELEASE_RETAIN,
            },
            protocol: ProtocolConfig {
                max_header: MAX_HEADER,
                max_brightness: MAX_BRIGHTNESS,
            },
        }
    }

    /// Check every tunable except the band map, which needs the spectrum
    /// length and is validated by [`BandMap::new`](crate::BandMap::new).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rate in [self.range.decay_low, self.range.decay_high] {
            if !unit_interval(rate) {
                return Err(ConfigError::DecayRate { rate });
            }
        }

        match &self.range.seed {
            RangeSeed::Sentinel if !self.range.auto_expand => {
                return Err(ConfigError::SentinelWithoutExpansion);
            }
            RangeSeed::Sentinel => {}
            RangeSeed::Static(ranges) => {
                for (channel, &(low, high)) in ranges.iter().enumerate() {
                    if !low.is_finite() || !high.is_finite() || low > high {
                        return Err(ConfigError::SeedRange { channel });
                    }
                }
            }
        }

        let NormalizerConfig {
            out_low,
            out_high,
            min_width,
        } = self.normalizer;
        if !out_low.is_finite() || !out_high.is_finite() || out_low >= out_high {
            return Err(ConfigError::OutputInterval {
                low: out_low,
                high: out_high,
            });
        }
        if min_width <= 0.0 || !min_width.is_finite() {
            return Err(ConfigError::MinWidth { width: min_width });
        }

        for factor in [self.smoothing.attack, self.smoothing.release] {
            if !unit_interval(factor) {
                return Err(ConfigError::SmoothingFactor { factor });
            }
        }

        self.protocol.validate(C)
    }
}

impl<const C: usize> Default for EngineConfig<C> {
    fn default() -> Self {
        Self::reference()
    }
}

/// `[0, 1)`; NaN is rejected.
fn unit_interval(value: f32) -> bool {
    (0.0..1.0).contains(&value)
}
