use core::fmt;

use microfft::real::{
    rfft_1024, rfft_128, rfft_16, rfft_2048, rfft_256, rfft_32, rfft_4, rfft_4096, rfft_512,
    rfft_64, rfft_8,
};
use microfft::Complex32;

/// Turns a windowed frame of `N` real samples into `N / 2` complex bins.
///
/// The returned spectrum borrows from the transform and the input buffer, so
/// it cannot outlive the pass that requested it.
pub trait SpectrumTransform<const N: usize> {
    type Error;

    fn transform<'a>(
        &'a mut self,
        windowed: &'a mut [f32; N],
    ) -> Result<&'a [Complex32], Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// `microfft` has no real transform for this frame length.
    UnsupportedSize { len: usize },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::UnsupportedSize { len } => write!(
                f,
                "no real FFT for frame length {len}: must be a power of two in 4..=4096"
            ),
        }
    }
}

/// In-place real FFT backed by `microfft`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFft;

impl RealFft {
    pub const fn supports(len: usize) -> bool {
        len.is_power_of_two() && len >= 4 && len <= 4096
    }
}

impl<const N: usize> SpectrumTransform<N> for RealFft {
    type Error = TransformError;

    fn transform<'a>(
        &'a mut self,
        windowed: &'a mut [f32; N],
    ) -> Result<&'a [Complex32], Self::Error> {
        let spectrum = real_fft(windowed).ok_or(TransformError::UnsupportedSize { len: N })?;
        // microfft packs the Nyquist term into the imaginary part of bin 0.
        if let Some(dc) = spectrum.first_mut() {
            dc.im = 0.0;
        }
        Ok(spectrum)
    }
}

fn real_fft(samples: &mut [f32]) -> Option<&mut [Complex32]> {
    macro_rules! dispatch {
        ($($len:literal => $rfft:ident),* $(,)?) => {
            match samples.len() {
                $($len => Some(&mut $rfft(samples.try_into().ok()?)[..]),)*
                _ => None,
            }
        };
    }

    dispatch!(
        4 => rfft_4,
        8 => rfft_8,
        16 => rfft_16,
        32 => rfft_32,
        64 => rfft_64,
        128 => rfft_128,
        256 => rfft_256,
        512 => rfft_512,
        1024 => rfft_1024,
        2048 => rfft_2048,
        4096 => rfft_4096,
    )
}

/// `sqrt(re² + im²)` of a single bin.
pub fn magnitude(bin: &Complex32) -> f32 {
    libm::sqrtf(bin.re * bin.re + bin.im * bin.im)
}
