#![allow(dead_code)]

use light_dsp::{magnitude, Complex32};
use wavegen::{sine, Waveform};

pub const FRAME_LEN: usize = 2048;
pub const SAMPLE_RATE_HZ: f32 = 44_100.0;

/// Centre frequency of FFT bin `bin` for a `FRAME_LEN` frame.
pub fn bin_frequency(bin: usize) -> f32 {
    bin as f32 * SAMPLE_RATE_HZ / FRAME_LEN as f32
}

/// One frame of a unit-amplitude sine.
pub fn sine_frame(frequency: f32) -> [f32; FRAME_LEN] {
    let waveform = Waveform::<f32>::with_components(44_100.0, vec![sine!(frequency)]);
    let mut frame = [0.0; FRAME_LEN];
    for (out, sample) in frame.iter_mut().zip(waveform.iter()) {
        *out = sample;
    }
    frame
}

/// The same sine quantized to 16-bit PCM.
pub fn sine_frame_i16(frequency: f32, amplitude: f32) -> [i16; FRAME_LEN] {
    let mut pcm = [0i16; FRAME_LEN];
    for (out, sample) in pcm.iter_mut().zip(sine_frame(frequency)) {
        *out = (sample * amplitude * i16::MAX as f32) as i16;
    }
    pcm
}

pub fn peak_bin(magnitudes: &[f32]) -> usize {
    magnitudes
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, &m)| if m > best.1 { (i, m) } else { best })
        .0
}

/// Magnitude of every bin of `spectrum`.
pub fn magnitude_spectrum(spectrum: &[Complex32]) -> Vec<f32> {
    spectrum.iter().map(magnitude).collect()
}
