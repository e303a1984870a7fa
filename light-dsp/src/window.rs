use core::f64::consts::PI;

/// Precomputed Hann analysis window of length `N`.
///
/// Coefficients follow the symmetric form `0.5 * (1 - cos(2πi / (N - 1)))`,
/// so both ends are zero and the centre sample is one.
pub struct HannWindow<const N: usize> {
    coefficients: [f32; N],
}

impl<const N: usize> HannWindow<N> {
    pub fn new() -> Self {
        let mut coefficients = [1.0; N];
        if N >= 2 {
            let span = (N - 1) as f64;
            for (i, c) in coefficients.iter_mut().enumerate() {
                *c = (0.5 * (1.0 - libm::cos(2.0 * PI * i as f64 / span))) as f32;
            }
        }
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f32; N] {
        &self.coefficients
    }

    /// `windowed[i] = raw[i] * window[i]`.
    pub fn apply(&self, raw: &[f32; N], windowed: &mut [f32; N]) {
        for ((out, &sample), &coefficient) in windowed.iter_mut().zip(raw).zip(&self.coefficients) {
            *out = sample * coefficient;
        }
    }

    /// Window `samples` in place.
    pub fn apply_in_place(&self, samples: &mut [f32; N]) {
        for (sample, &coefficient) in samples.iter_mut().zip(&self.coefficients) {
            *sample *= coefficient;
        }
    }
}

impl<const N: usize> Default for HannWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
