//! The lifecycle of an effect's processor.

use std::sync::Arc;

use gainstage_component::{
    Component, ProcessingEnvironment, ProcessingMode, Processor,
    audio::{Buffer, BufferMut, ChannelLayout, clear},
    effect::Effect,
    parameters::BufferStates,
};

use crate::{
    layout::{BusLayout, LayoutError},
    store::{MainStore, ProcessingStore, create_stores},
};

#[cfg(test)]
mod tests;

/// General information about an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info<'a> {
    /// User-visible name of the effect.
    pub name: &'a str,

    /// The "vendor" of the effect.
    ///
    /// Hosts often present plug-ins grouped by vendor.
    pub vendor: &'a str,

    /// User-visible version.
    pub version: &'a str,

    /// The category hosts file the effect under, e.g. `"Fx|Dynamics"`.
    pub category: &'a str,
}

/// Settings the host chooses before activating the processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    /// The sample rate of the audio, in hz.
    pub sampling_rate: f32,

    /// The most frames that will be passed to any single `process` call.
    pub max_samples_per_process_call: usize,

    /// The processing mode.
    pub processing_mode: ProcessingMode,
}

/// Errors from setting up and activating a [`Host`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SetupError {
    /// Setup can't change while the processor is active.
    #[error("can't change setup while active")]
    Active,

    /// The sampling rate must be positive.
    #[error("invalid sampling rate {0}")]
    InvalidSamplingRate(f32),

    /// Blocks must hold at least one frame.
    #[error("maximum block size must be at least one frame")]
    InvalidBlockSize,

    /// Activation needs a prior call to [`Host::setup`].
    #[error("activated before setup")]
    NotSetUp,

    /// The operation needs an active processor.
    #[error("processor is not active")]
    Inactive,
}

/// Errors from [`Host::process`].
///
/// On any error the output buffer is filled with silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    /// The processor is not active, or processing is off.
    #[error("not processing")]
    NotProcessing,

    /// The buffers don't match the negotiated bus layout.
    #[error("buffer layout doesn't match the bus layout")]
    LayoutMismatch,

    /// The buffers have different lengths, or are longer than the setup allows.
    #[error("invalid block size")]
    BlockSize,
}

struct ActiveProcessor<P> {
    processor: P,
    environment: ProcessingEnvironment,
    processing: bool,
}

/// Hosts a single effect.
///
/// The host owns the [`Component`] and, while active, the processor it
/// created. Parameter values are shared with other threads through
/// [`Host::parameters`].
pub struct Host<C: Component> {
    component: C,
    info: Info<'static>,
    main_store: Arc<MainStore>,
    processing_store: ProcessingStore,
    bus_layout: BusLayout,
    channel_layout: ChannelLayout,
    setup: Option<ProcessSetup>,
    active: Option<ActiveProcessor<C::Processor>>,
}

fn run<P: Effect, S: BufferStates, I: Buffer, O: BufferMut>(
    active: Option<&mut ActiveProcessor<P>>,
    states: S,
    input: &I,
    output: &mut O,
) -> Result<(), ProcessError> {
    let checked = match active {
        Some(active) if active.processing => {
            let environment = &active.environment;
            if input.channel_layout() != environment.channel_layout
                || output.channel_layout() != environment.channel_layout
            {
                Err(ProcessError::LayoutMismatch)
            } else if input.num_frames() != output.num_frames()
                || input.num_frames() > environment.max_samples_per_process_call
            {
                Err(ProcessError::BlockSize)
            } else {
                Ok(&mut active.processor)
            }
        }
        _ => Err(ProcessError::NotProcessing),
    };
    match checked {
        Ok(processor) => {
            processor.process(states, input, output);
            Ok(())
        }
        Err(e) => {
            clear(output);
            Err(e)
        }
    }
}

impl<C: Component<Processor: Effect>> Host<C> {
    /// Creates a host for `component`, with every parameter at its default
    /// and a stereo bus layout.
    ///
    /// # Panics
    ///
    /// Panics if the component has two parameters with the same id.
    pub fn new(component: C, info: Info<'static>) -> Self {
        let infos = component.parameter_infos();
        let (main_store, processing_store) = create_stores(infos.iter().map(Into::into));
        Self {
            component,
            info,
            main_store: Arc::new(main_store),
            processing_store,
            bus_layout: BusLayout::STEREO,
            channel_layout: ChannelLayout::Stereo,
            setup: None,
            active: None,
        }
    }

    /// Information about the hosted effect.
    #[must_use]
    pub fn info(&self) -> &Info<'static> {
        &self.info
    }

    /// Effects neither accept nor produce MIDI.
    #[must_use]
    pub fn accepts_midi(&self) -> bool {
        false
    }

    /// Effects neither accept nor produce MIDI.
    #[must_use]
    pub fn produces_midi(&self) -> bool {
        false
    }

    /// Output stops as soon as input stops.
    #[must_use]
    pub fn tail_seconds(&self) -> f64 {
        0.0
    }

    /// The main-thread side of the parameter store.
    ///
    /// This may be cloned and shared with UI or automation threads.
    #[must_use]
    pub fn parameters(&self) -> Arc<MainStore> {
        self.main_store.clone()
    }

    /// The current bus layout.
    #[must_use]
    pub fn bus_layout(&self) -> BusLayout {
        self.bus_layout
    }

    /// Whether the processor has been created.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Chooses the bus layout for the next activation.
    ///
    /// # Errors
    ///
    ///  - [`LayoutError::Active`] if the processor is active.
    ///  - [`LayoutError::Unsupported`] if the effect can't run with `layout`.
    pub fn set_bus_layout(&mut self, layout: BusLayout) -> Result<(), LayoutError> {
        if self.is_active() {
            log::warn!("Rejected bus layout change while active");
            return Err(LayoutError::Active);
        }
        let channel_layout = layout.channel_layout().inspect_err(|e| {
            log::warn!("Rejected bus layout: {e}");
        })?;
        log::info!("Bus layout set to {channel_layout:?}");
        self.bus_layout = layout;
        self.channel_layout = channel_layout;
        Ok(())
    }

    /// Chooses the processing setup for the next activation.
    ///
    /// # Errors
    ///
    ///  - [`SetupError::Active`] if the processor is active.
    ///  - [`SetupError::InvalidSamplingRate`] unless the sampling rate is positive.
    ///  - [`SetupError::InvalidBlockSize`] if the maximum block size is zero.
    pub fn setup(&mut self, setup: ProcessSetup) -> Result<(), SetupError> {
        let checked = if self.is_active() {
            Err(SetupError::Active)
        } else if !(setup.sampling_rate > 0.0 && setup.sampling_rate.is_finite()) {
            Err(SetupError::InvalidSamplingRate(setup.sampling_rate))
        } else if setup.max_samples_per_process_call == 0 {
            Err(SetupError::InvalidBlockSize)
        } else {
            Ok(())
        };
        checked.inspect_err(|e| {
            log::warn!("Rejected setup {setup:?}: {e}");
        })?;
        log::info!(
            "Setup: {} hz, up to {} frames per block, {:?}",
            setup.sampling_rate,
            setup.max_samples_per_process_call,
            setup.processing_mode
        );
        self.setup = Some(setup);
        Ok(())
    }

    /// Creates or drops the processor.
    ///
    /// Activation is where the processor allocates; deactivation frees it.
    /// The new processor starts with the current parameter values and with
    /// processing off.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NotSetUp`] when activating before [`Self::setup`].
    pub fn set_active(&mut self, active: bool) -> Result<(), SetupError> {
        match (active, self.active.is_some()) {
            (true, false) => {
                let setup = self.setup.ok_or(SetupError::NotSetUp)?;
                let environment = ProcessingEnvironment {
                    sampling_rate: setup.sampling_rate,
                    max_samples_per_process_call: setup.max_samples_per_process_call,
                    channel_layout: self.channel_layout,
                    processing_mode: setup.processing_mode,
                };
                let mut processor = self.component.create_processor(&environment);
                processor.handle_parameters(&self.processing_store);
                log::info!("Activated with {environment:?}");
                self.active = Some(ActiveProcessor {
                    processor,
                    environment,
                    processing: false,
                });
            }
            (false, true) => {
                if let Some(mut active) = self.active.take()
                    && active.processing
                {
                    active.processor.set_processing(false);
                }
                log::info!("Deactivated");
            }
            _ => {}
        }
        Ok(())
    }

    /// Turns processing on or off. Must not allocate or block.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Inactive`] if the processor is not active.
    pub fn set_processing(&mut self, processing: bool) -> Result<(), SetupError> {
        let active = self.active.as_mut().ok_or(SetupError::Inactive)?;
        if active.processing != processing {
            active.processing = processing;
            active.processor.set_processing(processing);
        }
        Ok(())
    }

    /// Hands the current parameter values to the processor outside of
    /// [`Self::process`].
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Inactive`] if the processor is not active.
    pub fn flush_parameters(&mut self) -> Result<(), SetupError> {
        let active = self.active.as_mut().ok_or(SetupError::Inactive)?;
        active.processor.handle_parameters(&self.processing_store);
        Ok(())
    }

    /// Processes one block with the current parameter values.
    ///
    /// Must not allocate or block.
    ///
    /// # Errors
    ///
    ///  - [`ProcessError::NotProcessing`] unless active with processing on.
    ///  - [`ProcessError::LayoutMismatch`] if a buffer's layout differs from the bus layout.
    ///  - [`ProcessError::BlockSize`] if the buffers have different lengths,
    ///    or are longer than the setup allows.
    ///
    /// `output` is silenced on error.
    pub fn process<I: Buffer, O: BufferMut>(
        &mut self,
        input: &I,
        output: &mut O,
    ) -> Result<(), ProcessError> {
        run(
            self.active.as_mut(),
            self.processing_store.buffer_states(),
            input,
            output,
        )
    }

    /// Like [`Self::process`], with parameter states supplied by the caller.
    ///
    /// This allows sample-accurate automation within the block.
    ///
    /// # Errors
    ///
    /// See [`Self::process`].
    pub fn process_with_states<S: BufferStates, I: Buffer, O: BufferMut>(
        &mut self,
        states: S,
        input: &I,
        output: &mut O,
    ) -> Result<(), ProcessError> {
        run(self.active.as_mut(), states, input, output)
    }
}
