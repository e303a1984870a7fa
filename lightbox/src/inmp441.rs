//! INMP441 I2S microphone reader.
//!
//! The microphone sends 16-bit stereo words over Philips I2S. Only the left
//! slot carries audio; frames are assembled across DMA pops so no samples are
//! dropped at pop boundaries.

use defmt::{error, info, trace};
use embassy_executor::task;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use core::convert::Infallible;

use esp_hal::{i2s::master::I2sRx, Async};
use light_dsp::normalize_samples;
use light_engine::FrameSource;

use crate::config::{DMA_BUFFER_SIZE, FRAME_LEN};

pub type FrameSignal = Signal<CriticalSectionRawMutex, [i16; FRAME_LEN]>;

const BYTES_PER_STEREO_WORD: usize = 4;

/// Collects left-slot samples into whole frames.
pub struct FrameAssembler {
    samples: [i16; FRAME_LEN],
    filled: usize,
    pending: [u8; BYTES_PER_STEREO_WORD],
    pending_len: usize,
}

impl FrameAssembler {
    pub const fn new() -> Self {
        Self {
            samples: [0; FRAME_LEN],
            filled: 0,
            pending: [0; BYTES_PER_STEREO_WORD],
            pending_len: 0,
        }
    }

    /// Feed raw DMA bytes, calling `on_frame` for every completed frame.
    pub fn push(&mut self, mut bytes: &[u8], mut on_frame: impl FnMut(&[i16; FRAME_LEN])) {
        // Finish a stereo word split across two pops.
        if self.pending_len > 0 {
            let take = (BYTES_PER_STEREO_WORD - self.pending_len).min(bytes.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&bytes[..take]);
            self.pending_len += take;
            bytes = &bytes[take..];
            if self.pending_len < BYTES_PER_STEREO_WORD {
                return;
            }
            let word = self.pending;
            self.pending_len = 0;
            self.push_word(&word, &mut on_frame);
        }

        let mut words = bytes.chunks_exact(BYTES_PER_STEREO_WORD);
        for word in &mut words {
            self.push_word(word, &mut on_frame);
        }
        let rest = words.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn push_word(&mut self, word: &[u8], on_frame: &mut impl FnMut(&[i16; FRAME_LEN])) {
        // Philips standard: left slot first.
        self.samples[self.filled] = i16::from_le_bytes([word[0], word[1]]);
        self.filled += 1;
        if self.filled == FRAME_LEN {
            on_frame(&self.samples);
            self.filled = 0;
        }
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// A frame handed over by [`microphone_reader`], read once by the engine.
pub struct PcmFrame<'a> {
    samples: &'a [i16; FRAME_LEN],
}

impl<'a> PcmFrame<'a> {
    pub fn new(samples: &'a [i16; FRAME_LEN]) -> Self {
        Self { samples }
    }
}

impl FrameSource<FRAME_LEN> for PcmFrame<'_> {
    type Error = Infallible;

    fn read_frame(&mut self, frame: &mut [f32; FRAME_LEN]) -> Result<usize, Self::Error> {
        Ok(normalize_samples(self.samples, frame))
    }
}

#[task]
pub async fn microphone_reader(
    i2s_rx: I2sRx<'static, Async>,
    buffer: &'static mut [u8; DMA_BUFFER_SIZE],
    signal: &'static FrameSignal,
) {
    info!("Starting microphone_reader task");

    let mut data = [0u8; FRAME_LEN * BYTES_PER_STEREO_WORD];
    let mut assembler = FrameAssembler::new();

    let mut transaction = match i2s_rx.read_dma_circular_async(buffer) {
        Ok(transaction) => transaction,
        Err(e) => {
            error!("I2S DMA read_dma_circular_async failed: {:?}", e);
            panic!("microphone unavailable");
        }
    };

    loop {
        match transaction.pop(&mut data).await {
            Ok(count) => {
                trace!("I2S read {} bytes", count);
                assembler.push(&data[..count], |frame| signal.signal(*frame));
            }
            Err(e) => {
                error!("I2S DMA pop error: {:?}", e);
                panic!("microphone stream lost");
            }
        }
    }
}
