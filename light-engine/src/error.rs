use core::fmt;

use crate::band_map::BandMapError;

/// Invalid static configuration, reported by [`Engine::new`](crate::Engine::new).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ConfigError {
    /// A decay rate outside `[0, 1)`.
    DecayRate { rate: f32 },
    /// A smoothing retain factor outside `[0, 1)`.
    SmoothingFactor { factor: f32 },
    /// The normalizer output interval is empty or not finite.
    OutputInterval { low: f32, high: f32 },
    /// The degenerate-range epsilon must be positive and finite.
    MinWidth { width: f32 },
    /// A static seed envelope is inverted or not finite.
    SeedRange { channel: usize },
    /// The sentinel seed only makes sense when the envelope may expand.
    SentinelWithoutExpansion,
    /// Header bytes would collide with brightness bytes.
    Protocol {
        channels: usize,
        max_header: u8,
        max_brightness: u8,
    },
    BandMap(BandMapError),
}

impl From<BandMapError> for ConfigError {
    fn from(err: BandMapError) -> Self {
        ConfigError::BandMap(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DecayRate { rate } => {
                write!(f, "decay rate {rate} must be in [0, 1)")
            }
            ConfigError::SmoothingFactor { factor } => {
                write!(f, "smoothing factor {factor} must be in [0, 1)")
            }
            ConfigError::OutputInterval { low, high } => {
                write!(f, "normalizer output interval [{low}, {high}] is empty")
            }
            ConfigError::MinWidth { width } => {
                write!(f, "minimum envelope width {width} must be positive")
            }
            ConfigError::SeedRange { channel } => {
                write!(f, "seed envelope for channel {channel} is inverted or not finite")
            }
            ConfigError::SentinelWithoutExpansion => {
                write!(f, "sentinel seed requires auto expansion")
            }
            ConfigError::Protocol {
                channels,
                max_header,
                max_brightness,
            } => write!(
                f,
                "{channels} channels do not fit between header {max_header} and brightness {max_brightness}"
            ),
            ConfigError::BandMap(err) => write!(f, "band map: {err}"),
        }
    }
}

/// Failure of one of the pipeline's collaborators. Never retried by the
/// engine; the enclosing process is expected to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum PipelineError<S, T, K> {
    /// The audio source failed.
    Source(S),
    /// The audio source returned fewer samples than a full frame.
    ShortRead { expected: usize, got: usize },
    /// The transform engine failed.
    Transform(T),
    /// The output sink rejected a message.
    Sink(K),
}

impl<S, T, K> fmt::Display for PipelineError<S, T, K>
where
    S: fmt::Display,
    T: fmt::Display,
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Source(err) => write!(f, "audio source failed: {err}"),
            PipelineError::ShortRead { expected, got } => {
                write!(f, "short read from audio source: {got} of {expected} samples")
            }
            PipelineError::Transform(err) => write!(f, "transform failed: {err}"),
            PipelineError::Sink(err) => write!(f, "output sink failed: {err}"),
        }
    }
}
