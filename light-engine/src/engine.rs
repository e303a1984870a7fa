use light_dsp::{process_frame, Complex32, HannWindow, SpectrumTransform};

use crate::band_map::BandMap;
use crate::binner::{bin_spectrum, BinSummary};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::normalizer::Normalizer;
use crate::protocol::{LightMessage, ProtocolConfig};
use crate::quantizer::Quantizer;
use crate::range_tracker::{RangeSeed, RangeTracker};
use crate::smoother::Smoother;
use crate::state::EngineState;

/// Everything one pass produced, per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport<const C: usize> {
    /// Sequence number of the pass, starting at 1.
    pub frame: u64,
    pub raw_intensity: [f32; C],
    pub normalized: [f32; C],
    pub smoothed: [f32; C],
    pub levels: [u8; C],
    /// Channels whose envelope had collapsed; their level was forced to 0.
    pub degenerate: [bool; C],
    protocol: ProtocolConfig,
}

impl<const C: usize> FrameReport<C> {
    /// Wire messages for every channel, in channel order.
    pub fn messages(&self) -> impl Iterator<Item = LightMessage> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(move |(channel, &level)| self.protocol.message(channel, level))
    }

    pub fn degenerate_count(&self) -> usize {
        self.degenerate.iter().filter(|&&d| d).count()
    }
}

/// The spectral-to-light pipeline for `N`-sample frames and `C` channels.
///
/// Holds only static configuration and scratch buffers; all state that
/// carries across frames lives in the caller's [`EngineState`].
pub struct Engine<const N: usize, const C: usize> {
    window: HannWindow<N>,
    band_map: BandMap<C>,
    summary: BinSummary,
    seed: RangeSeed<C>,
    tracker: RangeTracker,
    normalizer: Normalizer,
    smoother: Smoother,
    quantizer: Quantizer,
    protocol: ProtocolConfig,
    frame: [f32; N],
    windowed: [f32; N],
}

impl<const N: usize, const C: usize> Engine<N, C> {
    pub fn new(config: EngineConfig<C>) -> Result<Self, ConfigError> {
        config.validate()?;
        let band_map = BandMap::new(&config.bands, N / 2)?;

        #[cfg(feature = "logging")]
        defmt::info!(
            "light engine: {} channels, {}-sample frames, bins {}..{}",
            C,
            N,
            band_map.first_bin(),
            band_map.end_bin()
        );

        Ok(Self {
            window: HannWindow::new(),
            band_map,
            summary: config.summary,
            seed: config.range.seed,
            tracker: RangeTracker::new(&config.range),
            normalizer: Normalizer::new(config.normalizer),
            smoother: Smoother::new(config.smoothing),
            quantizer: Quantizer::new(config.protocol.max_brightness),
            protocol: config.protocol,
            frame: [0.0; N],
            windowed: [0.0; N],
        })
    }

    /// Fresh per-channel state seeded from the configured envelope.
    pub fn initial_state(&self) -> EngineState<C> {
        EngineState::new(&self.seed)
    }

    pub fn band_map(&self) -> &BandMap<C> {
        &self.band_map
    }

    pub fn window(&self) -> &HannWindow<N> {
        &self.window
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    /// Run all six stages on one frame.
    ///
    /// The spectrum borrowed from `transform` is released before this
    /// returns.
    pub fn process<T>(
        &mut self,
        state: &mut EngineState<C>,
        frame: &[f32; N],
        transform: &mut T,
    ) -> Result<FrameReport<C>, T::Error>
    where
        T: SpectrumTransform<N>,
    {
        let raw_intensity = analyze(
            &self.window,
            &self.band_map,
            self.summary,
            frame,
            &mut self.windowed,
            transform,
        )?;
        Ok(self.process_intensities(state, raw_intensity))
    }

    /// Run the stages after the transform on an existing spectrum.
    pub fn process_spectrum(
        &self,
        state: &mut EngineState<C>,
        spectrum: &[Complex32],
    ) -> FrameReport<C> {
        let mut raw_intensity = [0.0; C];
        bin_spectrum(spectrum, &self.band_map, self.summary, &mut raw_intensity);
        self.process_intensities(state, raw_intensity)
    }

    /// Range tracking, normalization, smoothing and quantization of one
    /// frame's raw intensities.
    pub fn process_intensities(
        &self,
        state: &mut EngineState<C>,
        raw_intensity: [f32; C],
    ) -> FrameReport<C> {
        let mut report = FrameReport {
            frame: state.advance(),
            raw_intensity,
            normalized: [0.0; C],
            smoothed: [0.0; C],
            levels: [0; C],
            degenerate: [false; C],
            protocol: self.protocol,
        };

        for (i, channel) in state.channels_mut().iter_mut().enumerate() {
            let raw = raw_intensity[i];
            self.tracker.update(&mut channel.envelope, raw);

            let normalized = self.normalizer.normalize(raw, &channel.envelope);
            #[cfg(feature = "logging")]
            if normalized.is_degenerate() {
                defmt::trace!("channel {}: degenerate envelope, output forced to 0", i);
            }

            report.normalized[i] = normalized.value();
            report.degenerate[i] = normalized.is_degenerate();
            report.smoothed[i] = self.smoother.smooth(&mut channel.smoothed, normalized.value());
            report.levels[i] = self.quantizer.quantize(report.smoothed[i]);
        }

        report
    }

    /// Window, transform and bin the engine's own frame buffer.
    pub(crate) fn analyze_buffered<T>(&mut self, transform: &mut T) -> Result<[f32; C], T::Error>
    where
        T: SpectrumTransform<N>,
    {
        analyze(
            &self.window,
            &self.band_map,
            self.summary,
            &self.frame,
            &mut self.windowed,
            transform,
        )
    }

    pub(crate) fn frame_buffer(&mut self) -> &mut [f32; N] {
        &mut self.frame
    }
}

fn analyze<T, const N: usize, const C: usize>(
    window: &HannWindow<N>,
    band_map: &BandMap<C>,
    summary: BinSummary,
    frame: &[f32; N],
    windowed: &mut [f32; N],
    transform: &mut T,
) -> Result<[f32; C], T::Error>
where
    T: SpectrumTransform<N>,
{
    let spectrum = process_frame(window, transform, frame, windowed)?;

    let mut raw_intensity = [0.0; C];
    bin_spectrum(spectrum, band_map, summary, &mut raw_intensity);
    Ok(raw_intensity)
}
