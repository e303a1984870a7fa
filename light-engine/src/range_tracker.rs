//! Self-calibrating dynamic range of each channel.
//!
//! Every frame the envelope first widens to include the new intensity, then
//! both bounds creep toward each other. `low` moves by `decay_low` of the gap,
//! then `high` moves by `decay_high` of the *remaining* gap. The envelope
//! therefore follows slow changes of loudness without a calibration step and
//! without ever jumping.

use crate::config::RANGE_LOW_SENTINEL;
use crate::state::Envelope;

/// Initial envelope of every channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum RangeSeed<const C: usize> {
    /// `low` at a huge sentinel and `high` at zero, so the first frame
    /// replaces both with real data.
    Sentinel,
    /// Fixed `(low, high)` per channel.
    Static([(f32, f32); C]),
}

impl<const C: usize> RangeSeed<C> {
    pub fn envelope(&self, channel: usize) -> Envelope {
        match self {
            RangeSeed::Sentinel => Envelope::new(RANGE_LOW_SENTINEL, 0.0),
            RangeSeed::Static(ranges) => {
                let (low, high) = ranges[channel];
                Envelope::new(low, high)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct RangeConfig<const C: usize> {
    pub decay_low: f32,
    pub decay_high: f32,
    pub seed: RangeSeed<C>,
    /// Widen the envelope to new extremes. Off means the seed is a fixed
    /// calibration that only decays.
    pub auto_expand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTracker {
    decay_low: f32,
    decay_high: f32,
    auto_expand: bool,
}

impl RangeTracker {
    pub fn new<const C: usize>(config: &RangeConfig<C>) -> Self {
        Self {
            decay_low: config.decay_low,
            decay_high: config.decay_high,
            auto_expand: config.auto_expand,
        }
    }

    /// Advance `envelope` by one frame given this frame's raw intensity.
    pub fn update(&self, envelope: &mut Envelope, raw_intensity: f32) {
        if self.auto_expand && raw_intensity.is_finite() {
            envelope.low = envelope.low.min(raw_intensity);
            envelope.high = envelope.high.max(raw_intensity);
        }

        // Still at the sentinel: no finite intensity seen yet. Decaying or
        // clamping now would drag `high` up to the sentinel.
        if envelope.low > envelope.high {
            return;
        }

        // Sequential: the high step reads the already-moved low bound.
        let gap = envelope.width().max(0.0);
        envelope.low += self.decay_low * gap;
        let gap = envelope.width().max(0.0);
        envelope.high -= self.decay_high * gap;

        // low <= high, restored by clamping high, never by swapping.
        envelope.high = envelope.high.max(envelope.low);
    }
}
