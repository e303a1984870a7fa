use crate::range_tracker::RangeSeed;

/// Adaptive `[low, high]` bounds of one channel's raw intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct Envelope {
    pub low: f32,
    pub high: f32,
}

impl Envelope {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f32 {
        self.high - self.low
    }
}

/// Persistent per-channel state carried from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct ChannelState {
    pub envelope: Envelope,
    /// Output of the smoother, in `[0, 1]`.
    pub smoothed: f32,
}

/// All mutable state of the engine. Owned by the caller and handed to
/// [`Engine`](crate::Engine) by reference on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState<const C: usize> {
    channels: [ChannelState; C],
    frames: u64,
}

impl<const C: usize> EngineState<C> {
    pub fn new(seed: &RangeSeed<C>) -> Self {
        let mut channels = [ChannelState {
            envelope: Envelope::new(0.0, 0.0),
            smoothed: 0.0,
        }; C];
        for (i, channel) in channels.iter_mut().enumerate() {
            channel.envelope = seed.envelope(i);
        }
        Self { channels, frames: 0 }
    }

    pub fn channels(&self) -> &[ChannelState; C] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [ChannelState; C] {
        &mut self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&ChannelState> {
        self.channels.get(index)
    }

    /// Number of passes completed since start-up.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub(crate) fn advance(&mut self) -> u64 {
        self.frames = self.frames.wrapping_add(1);
        self.frames
    }
}
