//! Abstractions for processors that effect audio.

use crate::audio::{Buffer, BufferMut};
use crate::{Processor, parameters, parameters::BufferStates};

/// A trait for audio effects
///
/// An effect is a processor that has both an input and an output
/// audio stream. It will receive information about the current state of the parameters
/// specified by the [`crate::Component`] that created it.
pub trait Effect: Processor {
    /// Handle parameter changes without processing any audio data.
    ///
    /// Must not allocate or block.
    fn handle_parameters<P: parameters::States>(&mut self, parameters: P);

    /// Process one block of audio.
    ///
    /// Must not allocate or block.
    ///
    /// `input` and `output` will have the same channel layout and the same
    /// number of frames, which is never more than
    /// `environment.max_samples_per_process_call`.
    ///
    /// `output` arrives in an undetermined state and must be completely
    /// filled by the processor during this call.
    ///
    /// `parameters` describes each parameter throughout the block; use
    /// [`crate::pzip`] to turn it into a per-sample iterator.
    fn process<P: BufferStates, I: Buffer, O: BufferMut>(
        &mut self,
        parameters: P,
        input: &I,
        output: &mut O,
    );
}
