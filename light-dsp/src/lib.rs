#![no_std]

//! Frame-level DSP for the light engine: PCM conversion, the Hann analysis
//! window and the real FFT that turns a windowed frame into a spectrum.

pub mod pcm;
pub mod transform;
pub mod window;

pub use microfft::Complex32;
pub use pcm::{downmix_interleaved, normalize_sample, normalize_samples};
pub use transform::{magnitude, RealFft, SpectrumTransform, TransformError};
pub use window::HannWindow;

/// Window a frame and transform it.
///
/// The spectrum borrows `transform` and `scratch`, so it is released before
/// either can be used for the next frame.
pub fn process_frame<'a, T, const N: usize>(
    window: &HannWindow<N>,
    transform: &'a mut T,
    frame: &[f32; N],
    scratch: &'a mut [f32; N],
) -> Result<&'a [Complex32], T::Error>
where
    T: SpectrumTransform<N>,
{
    // Step 1: Apply Hann window
    window.apply(frame, scratch);

    // Step 2: Compute FFT
    transform.transform(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_frame_silence() {
        let window = HannWindow::<1024>::new();
        let mut fft = RealFft;
        let frame = [0.0; 1024];
        let mut scratch = [1.0; 1024];

        let spectrum = process_frame(&window, &mut fft, &frame, &mut scratch).unwrap();

        assert_eq!(spectrum.len(), 512);
        assert!(spectrum.iter().all(|bin| magnitude(bin) == 0.0));
    }

    #[test]
    fn test_process_frame_constant_lands_in_dc() {
        let window = HannWindow::<256>::new();
        let mut fft = RealFft;
        let frame = [0.25; 256];
        let mut scratch = [0.0; 256];

        let spectrum = process_frame(&window, &mut fft, &frame, &mut scratch).unwrap();

        assert!(magnitude(&spectrum[0]) > magnitude(&spectrum[4]));
    }

    #[test]
    fn test_process_frame_reports_transform_failure() {
        let window = HannWindow::<12>::new();
        let mut fft = RealFft;
        let frame = [0.0; 12];
        let mut scratch = [0.0; 12];

        let result = process_frame(&window, &mut fft, &frame, &mut scratch);
        assert_eq!(result, Err(TransformError::UnsupportedSize { len: 12 }));
    }
}
