//! Basic abstractions for audio effects in gainstage.
//!
//! An effect is described by a [`Component`], which lists its parameters and
//! creates a [`Processor`] once the processing environment is known. The
//! processor then receives blocks of audio through the [`effect::Effect`] trait,
//! together with the state of every parameter across that block.

pub mod audio;
pub mod effect;
pub mod parameters;

#[doc(hidden)]
pub use itertools;

/// The mode that the processor will run in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProcessingMode {
    /// The component is processing audio in realtime.
    Realtime,

    /// The component may not be running in realtime, but should use the same quality settings as `Realtime`.
    Prefetch,

    /// The component is processing audio in offline mode.
    Offline,
}

/// Information about the processing environment that the processor will run in.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingEnvironment {
    /// The sample rate of the audio, in hz.
    pub sampling_rate: f32,

    /// The maximum number of frames that will be passed to each call to `process`.
    ///
    /// Fewer frames may be passed than this.
    pub max_samples_per_process_call: usize,

    /// The channel layout of both the input and the output.
    pub channel_layout: audio::ChannelLayout,

    /// The processing mode that the processor will run in.
    pub processing_mode: ProcessingMode,
}

/// The outward-facing description of an effect.
///
/// A [`Component`] knows which parameters the effect has, and can create the
/// processor that actually handles audio. There should be exactly one
/// `Component` per plug-in; smaller building blocks inside the effect
/// should use plain structs instead.
pub trait Component {
    /// The processor that this component creates.
    type Processor;

    /// Get information about the parameters of this component
    ///
    /// This must return the same value every time it is called.
    fn parameter_infos(&self) -> Vec<parameters::Info> {
        Default::default()
    }

    /// Create the processor that will actually process audio.
    ///
    /// Any state needed to process audio must be allocated here, since
    /// processing itself may not allocate.
    fn create_processor(&self, environment: &ProcessingEnvironment) -> Self::Processor;
}

/// A base trait for audio processors.
pub trait Processor {
    /// Enable or disable processing. Must not allocate or block.
    ///
    /// Processing starts off.
    ///
    /// After toggling this on -> off -> on, the processor must generate the
    /// _exact_ same output as the first time it was turned on, i.e.,
    /// turning processing off acts as a reset.
    ///
    /// `process` will only ever be called _after_ `set_processing(true)`.
    fn set_processing(&mut self, processing: bool);
}
