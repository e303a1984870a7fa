//! Conversion of signed 16-bit PCM into `f32` frames.

/// Normalize a single sample from i16 to f32.
pub fn normalize_sample(sample: i16) -> f32 {
    sample as f32 / i16::MAX as f32
}

/// Normalize a slice of i16 samples into `normalized_samples`.
///
/// Only the overlapping prefix of the two slices is converted. Returns the
/// number of samples written.
pub fn normalize_samples(samples: &[i16], normalized_samples: &mut [f32]) -> usize {
    let count = samples.len().min(normalized_samples.len());
    for (out, &sample) in normalized_samples.iter_mut().zip(samples) {
        *out = normalize_sample(sample);
    }
    count
}

/// Down-mix interleaved PCM to mono by averaging the channels of each frame.
///
/// Trailing samples that do not form a complete frame are ignored, as are
/// frames that do not fit in `mono`. Returns the number of mono samples
/// written; `channels == 0` writes nothing.
pub fn downmix_interleaved(samples: &[i16], channels: usize, mono: &mut [f32]) -> usize {
    if channels == 0 {
        return 0;
    }

    let mut written = 0;
    for (out, frame) in mono.iter_mut().zip(samples.chunks_exact(channels)) {
        let sum: f32 = frame.iter().map(|&s| normalize_sample(s)).sum();
        *out = sum / channels as f32;
        written += 1;
    }
    written
}
