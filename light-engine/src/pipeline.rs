//! Driving the engine from its collaborators: an audio source, a transform
//! engine and a light sink.

use light_dsp::SpectrumTransform;

use crate::engine::{Engine, FrameReport};
use crate::error::PipelineError;
use crate::protocol::LightMessage;
use crate::state::EngineState;

/// Blocking source of fixed-size audio frames.
pub trait FrameSource<const N: usize> {
    type Error;

    /// Fill `frame` and return how many samples were written. Anything less
    /// than `N` is a short read.
    fn read_frame(&mut self, frame: &mut [f32; N]) -> Result<usize, Self::Error>;
}

/// Receiver of per-channel light messages.
pub trait LightSink {
    type Error;

    fn send(&mut self, message: LightMessage) -> Result<(), Self::Error>;
}

/// Send every channel of `report` to `sink`, in channel order.
pub fn send_report<K, const C: usize>(report: &FrameReport<C>, sink: &mut K) -> Result<(), K::Error>
where
    K: LightSink,
{
    for message in report.messages() {
        sink.send(message)?;
    }
    Ok(())
}

impl<const N: usize, const C: usize> Engine<N, C> {
    /// One complete pass: read a frame, process it and send the result.
    ///
    /// Nothing is sent for a frame that fails; failures are never retried.
    pub fn run_frame<S, T, K>(
        &mut self,
        state: &mut EngineState<C>,
        source: &mut S,
        transform: &mut T,
        sink: &mut K,
    ) -> Result<FrameReport<C>, PipelineError<S::Error, T::Error, K::Error>>
    where
        S: FrameSource<N>,
        T: SpectrumTransform<N>,
        K: LightSink,
    {
        let got = source
            .read_frame(self.frame_buffer())
            .map_err(PipelineError::Source)?;
        if got < N {
            #[cfg(feature = "logging")]
            defmt::error!("short read from audio source: {} of {} samples", got, N);
            return Err(PipelineError::ShortRead { expected: N, got });
        }

        let raw_intensity = self
            .analyze_buffered(transform)
            .map_err(PipelineError::Transform)?;
        let report = self.process_intensities(state, raw_intensity);

        send_report(&report, sink).map_err(PipelineError::Sink)?;
        Ok(report)
    }

    /// Run passes until `keep_running` returns false or a collaborator fails.
    ///
    /// `keep_running` is asked after each completed pass, so the last frame
    /// is always fully sent before returning. Returns the number of passes.
    pub fn run<S, T, K, F>(
        &mut self,
        state: &mut EngineState<C>,
        source: &mut S,
        transform: &mut T,
        sink: &mut K,
        mut keep_running: F,
    ) -> Result<u64, PipelineError<S::Error, T::Error, K::Error>>
    where
        S: FrameSource<N>,
        T: SpectrumTransform<N>,
        K: LightSink,
        F: FnMut(&FrameReport<C>) -> bool,
    {
        let mut passes = 0;
        loop {
            let report = self.run_frame(state, source, transform, sink)?;
            passes += 1;
            if !keep_running(&report) {
                return Ok(passes);
            }
        }
    }
}
