use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use gainstage_component::{
    Component, ProcessingEnvironment, ProcessingMode, Processor,
    audio::{
        Buffer, BufferData, BufferMut, ChannelLayout, all_approx_eq, channels, channels_mut,
    },
    effect::Effect,
    parameters::{
        self, BufferStates, Flags, InternalValue, States, StaticInfoRef, TypeSpecificInfoRef,
        Value, test_utils::RampedStatesMap,
    },
    pzip,
};

use super::{Host, Info, ProcessError, ProcessSetup, SetupError};
use crate::{BusLayout, LayoutError, MainStore};

static PARAMETERS: [StaticInfoRef; 2] = [
    StaticInfoRef {
        unique_id: "level",
        title: "Level",
        short_title: "Level",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 1.0,
            valid_range: 0.0..=2.0,
            units: None,
        },
    },
    StaticInfoRef {
        unique_id: "mute",
        title: "Mute",
        short_title: "Mute",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Switch { default: false },
    },
];

const INFO: Info<'static> = Info {
    name: "Scale",
    vendor: "Test",
    version: "1.0.0",
    category: "Fx",
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Created(ProcessingEnvironment),
    Processing(bool),
    Handled(f32),
}

#[derive(Clone, Default)]
struct ScaleComponent {
    events: Arc<Mutex<Vec<Event>>>,
}

struct Scale {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Component for ScaleComponent {
    type Processor = Scale;

    fn parameter_infos(&self) -> Vec<parameters::Info> {
        parameters::to_infos(&PARAMETERS)
    }

    fn create_processor(&self, environment: &ProcessingEnvironment) -> Self::Processor {
        self.events
            .lock()
            .unwrap()
            .push(Event::Created(environment.clone()));
        Scale {
            events: self.events.clone(),
        }
    }
}

impl Processor for Scale {
    fn set_processing(&mut self, processing: bool) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Processing(processing));
    }
}

impl Effect for Scale {
    fn handle_parameters<P: States>(&mut self, parameters: P) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Handled(parameters.get_numeric("level").unwrap()));
    }

    fn process<P: BufferStates, I: Buffer, O: BufferMut>(
        &mut self,
        parameters: P,
        input: &I,
        output: &mut O,
    ) {
        for (input, output) in channels(input).zip(channels_mut(output)) {
            for ((level, mute), (i, o)) in pzip!(parameters[numeric "level", switch "mute"])
                .zip(input.iter().zip(output.iter_mut()))
            {
                *o = if mute { 0.0 } else { i * level };
            }
        }
    }
}

fn setup(max_samples_per_process_call: usize) -> ProcessSetup {
    ProcessSetup {
        sampling_rate: 48000.0,
        max_samples_per_process_call,
        processing_mode: ProcessingMode::Realtime,
    }
}

fn running_host(layout: BusLayout) -> (Host<ScaleComponent>, Arc<Mutex<Vec<Event>>>) {
    let component = ScaleComponent::default();
    let events = component.events.clone();
    let mut host = Host::new(component, INFO);
    host.set_bus_layout(layout).unwrap();
    host.setup(setup(4)).unwrap();
    host.set_active(true).unwrap();
    host.set_processing(true).unwrap();
    (host, events)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn fixed_metadata() {
    let host = Host::new(ScaleComponent::default(), INFO);
    assert_eq!(host.info().name, "Scale");
    assert!(!host.accepts_midi());
    assert!(!host.produces_midi());
    assert_eq!(host.tail_seconds(), 0.0);
    assert_eq!(host.bus_layout(), BusLayout::STEREO);
    assert!(!host.is_active());
}

#[test]
fn parameters_start_at_defaults() {
    let host = Host::new(ScaleComponent::default(), INFO);
    let params = host.parameters();
    assert_eq!(params.get("level"), Some(Value::Numeric(1.0)));
    assert_eq!(params.get("mute"), Some(Value::Switch(false)));
}

#[test]
fn activation_requires_setup() {
    init_logging();
    let mut host = Host::new(ScaleComponent::default(), INFO);
    assert_eq!(host.set_active(true), Err(SetupError::NotSetUp));
    assert!(!host.is_active());
}

#[test]
fn setup_validates_values() {
    init_logging();
    let mut host = Host::new(ScaleComponent::default(), INFO);
    assert_eq!(
        host.setup(ProcessSetup {
            sampling_rate: 0.0,
            ..setup(4)
        }),
        Err(SetupError::InvalidSamplingRate(0.0))
    );
    assert!(matches!(
        host.setup(ProcessSetup {
            sampling_rate: f32::INFINITY,
            ..setup(4)
        }),
        Err(SetupError::InvalidSamplingRate(_))
    ));
    assert_eq!(host.setup(setup(0)), Err(SetupError::InvalidBlockSize));
    assert_eq!(host.setup(setup(4)), Ok(()));
}

#[test]
fn activation_creates_processor_with_environment() {
    let (_host, events) = running_host(BusLayout::MONO);
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Event::Created(ProcessingEnvironment {
                sampling_rate: 48000.0,
                max_samples_per_process_call: 4,
                channel_layout: ChannelLayout::Mono,
                processing_mode: ProcessingMode::Realtime,
            }),
            Event::Handled(1.0),
            Event::Processing(true),
        ]
    );
}

#[test]
fn changes_rejected_while_active() {
    init_logging();
    let (mut host, _) = running_host(BusLayout::STEREO);
    assert_eq!(host.setup(setup(8)), Err(SetupError::Active));
    assert_eq!(host.set_bus_layout(BusLayout::MONO), Err(LayoutError::Active));
    host.set_active(false).unwrap();
    assert_eq!(host.set_bus_layout(BusLayout::MONO), Ok(()));
    assert_eq!(host.setup(setup(8)), Ok(()));
}

#[test]
fn unsupported_layouts_are_rejected() {
    let mut host = Host::new(ScaleComponent::default(), INFO);
    let layout = BusLayout {
        input: Some(ChannelLayout::Mono),
        output: Some(ChannelLayout::Stereo),
    };
    assert!(matches!(
        host.set_bus_layout(layout),
        Err(LayoutError::Unsupported { .. })
    ));
    assert_eq!(host.bus_layout(), BusLayout::STEREO);
}

#[test]
fn deactivation_stops_processing() {
    let (mut host, events) = running_host(BusLayout::STEREO);
    host.set_active(false).unwrap();
    assert!(!host.is_active());
    assert_eq!(events.lock().unwrap().last(), Some(&Event::Processing(false)));
    assert_eq!(host.set_processing(true), Err(SetupError::Inactive));
    assert_eq!(host.flush_parameters(), Err(SetupError::Inactive));
}

#[test]
fn process_applies_store_values() {
    let (mut host, _) = running_host(BusLayout::STEREO);
    host.parameters()
        .set("level", Value::Numeric(0.5))
        .unwrap();
    let input = BufferData::new_stereo([1.0, 2.0, 3.0], [-1.0, -2.0, -3.0]);
    let mut output = BufferData::new(ChannelLayout::Stereo, 3);
    assert_eq!(host.process(&input, &mut output), Ok(()));
    assert_eq!(
        output,
        BufferData::new_stereo([0.5, 1.0, 1.5], [-0.5, -1.0, -1.5])
    );
}

/// Output that changes `level` when the effect asks for its second channel.
struct WritesLevelMidBlock {
    buffer: BufferData,
    store: Arc<MainStore>,
}

impl Buffer for WritesLevelMidBlock {
    fn channel_layout(&self) -> ChannelLayout {
        self.buffer.channel_layout()
    }

    fn num_frames(&self) -> usize {
        self.buffer.num_frames()
    }

    fn channel(&self, channel: usize) -> &[f32] {
        self.buffer.channel(channel)
    }
}

impl BufferMut for WritesLevelMidBlock {
    fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        if channel == 1 {
            self.store.set("level", Value::Numeric(0.0)).unwrap();
        }
        self.buffer.channel_mut(channel)
    }
}

#[test]
fn store_writes_during_a_block_wait_for_the_next() {
    let (mut host, _) = running_host(BusLayout::STEREO);
    let input = BufferData::new_stereo([1.0, 1.0], [1.0, 1.0]);
    let mut output = WritesLevelMidBlock {
        buffer: BufferData::new(ChannelLayout::Stereo, 2),
        store: host.parameters(),
    };
    assert_eq!(host.process(&input, &mut output), Ok(()));
    assert_eq!(
        output.buffer,
        BufferData::new_stereo([1.0, 1.0], [1.0, 1.0])
    );

    let mut next = BufferData::new(ChannelLayout::Stereo, 2);
    assert_eq!(host.process(&input, &mut next), Ok(()));
    assert_eq!(next, BufferData::new(ChannelLayout::Stereo, 2));
}

#[test]
fn process_with_ramped_states() {
    let (mut host, _) = running_host(BusLayout::MONO);
    let states = RampedStatesMap::new(
        PARAMETERS.iter().cloned(),
        &HashMap::from([("level", InternalValue::Numeric(0.0))]),
        &HashMap::from([("level", InternalValue::Numeric(1.5))]),
        4,
    );
    let input = BufferData::new_mono(vec![1.0; 4]);
    let mut output = BufferData::new(ChannelLayout::Mono, 4);
    assert_eq!(host.process_with_states(states, &input, &mut output), Ok(()));
    assert!(all_approx_eq(
        output.channel(0).iter().copied(),
        [0.0, 0.5, 1.0, 1.5],
        1e-6
    ));
}

#[test]
fn process_errors_silence_output() {
    let component = ScaleComponent::default();
    let mut host = Host::new(component, INFO);
    let input = BufferData::new_stereo([1.0, 1.0], [1.0, 1.0]);
    let mut output = BufferData::new_stereo([9.0, 9.0], [9.0, 9.0]);
    assert_eq!(
        host.process(&input, &mut output),
        Err(ProcessError::NotProcessing)
    );
    assert_eq!(output, BufferData::new(ChannelLayout::Stereo, 2));

    host.setup(setup(4)).unwrap();
    host.set_active(true).unwrap();
    let mut output = BufferData::new_stereo([9.0, 9.0], [9.0, 9.0]);
    assert_eq!(
        host.process(&input, &mut output),
        Err(ProcessError::NotProcessing)
    );
    assert_eq!(output, BufferData::new(ChannelLayout::Stereo, 2));
}

#[test]
fn process_rejects_mismatched_buffers() {
    let (mut host, _) = running_host(BusLayout::STEREO);

    let mono = BufferData::new_mono(vec![1.0; 2]);
    let mut output = BufferData::new_stereo([9.0, 9.0], [9.0, 9.0]);
    assert_eq!(
        host.process(&mono, &mut output),
        Err(ProcessError::LayoutMismatch)
    );
    assert_eq!(output, BufferData::new(ChannelLayout::Stereo, 2));

    let input = BufferData::new_stereo([1.0; 3], [1.0; 3]);
    let mut output = BufferData::new_stereo([9.0, 9.0], [9.0, 9.0]);
    assert_eq!(
        host.process(&input, &mut output),
        Err(ProcessError::BlockSize)
    );
    assert_eq!(output, BufferData::new(ChannelLayout::Stereo, 2));

    let input = BufferData::new(ChannelLayout::Stereo, 5);
    let mut output = BufferData::new_stereo([9.0; 5], [9.0; 5]);
    assert_eq!(
        host.process(&input, &mut output),
        Err(ProcessError::BlockSize)
    );
    assert_eq!(output, BufferData::new(ChannelLayout::Stereo, 5));
}

#[test]
fn flush_parameters_hands_over_current_values() {
    let (mut host, events) = running_host(BusLayout::STEREO);
    host.parameters()
        .set("level", Value::Numeric(2.0))
        .unwrap();
    host.flush_parameters().unwrap();
    assert_eq!(events.lock().unwrap().last(), Some(&Event::Handled(2.0)));
}

#[test]
fn redundant_processing_changes_are_ignored() {
    let (mut host, events) = running_host(BusLayout::STEREO);
    let before = events.lock().unwrap().len();
    host.set_processing(true).unwrap();
    assert_eq!(events.lock().unwrap().len(), before);
}
