#![allow(dead_code)]

use std::collections::VecDeque;

use light_engine::{FrameSource, LightMessage, LightSink, REFERENCE_FRAME_LEN};
use wavegen::{sine, Waveform};

pub const FRAME_LEN: usize = REFERENCE_FRAME_LEN;
pub const SAMPLE_RATE_HZ: f32 = 44_100.0;

/// Centre frequency of FFT bin `bin` for a `FRAME_LEN` frame.
pub fn bin_frequency(bin: usize) -> f32 {
    bin as f32 * SAMPLE_RATE_HZ / FRAME_LEN as f32
}

pub fn sine_frame(frequency: f32, amplitude: f32) -> [f32; FRAME_LEN] {
    let waveform = Waveform::<f32>::with_components(44_100.0, vec![sine!(frequency)]);
    let mut frame = [0.0; FRAME_LEN];
    for (out, sample) in frame.iter_mut().zip(waveform.iter()) {
        *out = sample * amplitude;
    }
    frame
}

/// Replays a fixed list of frames. Each entry may be shorter than a frame to
/// simulate a short read.
pub struct ScriptedSource {
    frames: VecDeque<Vec<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceExhausted;

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Vec<f32>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl<const N: usize> FrameSource<N> for ScriptedSource {
    type Error = SourceExhausted;

    fn read_frame(&mut self, frame: &mut [f32; N]) -> Result<usize, Self::Error> {
        let next = self.frames.pop_front().ok_or(SourceExhausted)?;
        let count = next.len().min(N);
        frame[..count].copy_from_slice(&next[..count]);
        Ok(count)
    }
}

/// Records the bytes that would go over the serial link.
#[derive(Default)]
pub struct RecordingSink {
    pub bytes: Vec<u8>,
    /// Fail on the message with this index.
    pub fail_at: Option<usize>,
    sent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDown;

impl RecordingSink {
    pub fn failing_at(message: usize) -> Self {
        Self {
            fail_at: Some(message),
            ..Self::default()
        }
    }
}

impl LightSink for RecordingSink {
    type Error = LinkDown;

    fn send(&mut self, message: LightMessage) -> Result<(), Self::Error> {
        if self.fail_at == Some(self.sent) {
            return Err(LinkDown);
        }
        self.sent += 1;
        self.bytes.extend_from_slice(&message.to_bytes());
        Ok(())
    }
}
