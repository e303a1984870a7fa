use light_dsp::{magnitude, Complex32};

use crate::band_map::BandMap;

/// How the magnitudes of one band are reduced to a channel intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BinSummary {
    #[default]
    Sum, // Total magnitude of the band
    Average, // Use the average value of the bins
    Max,     // Use the maximum value of the bins
    Rms,     // Use the root mean square of the bins
}

impl BinSummary {
    pub fn calculate(&self, bins: &[Complex32]) -> f32 {
        if bins.is_empty() {
            return 0.0;
        }
        let num_elements = bins.len() as f32;
        let magnitudes = bins.iter().map(magnitude);

        match *self {
            BinSummary::Sum => magnitudes.sum(),
            BinSummary::Average => magnitudes.sum::<f32>() / num_elements,
            BinSummary::Max => magnitudes.fold(0.0, f32::max),
            BinSummary::Rms => {
                let sum_of_squares: f32 = magnitudes.map(|m| m * m).sum();
                libm::sqrtf(sum_of_squares / num_elements)
            }
        }
    }
}

/// Reduce `spectrum` to one raw intensity per channel.
///
/// Bands reaching past the end of `spectrum` see only the bins that exist.
pub fn bin_spectrum<const C: usize>(
    spectrum: &[Complex32],
    band_map: &BandMap<C>,
    summary: BinSummary,
    raw_intensity: &mut [f32; C],
) {
    for (channel, intensity) in raw_intensity.iter_mut().enumerate() {
        let band = band_map.band(channel);
        let end = band.end.min(spectrum.len());
        let start = band.start.min(end);
        *intensity = summary.calculate(&spectrum[start..end]);
    }
}
