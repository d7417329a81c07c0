//! A gain effect with optional sine-wave amplitude modulation.
//!
//! Each sample is scaled by the `gain` parameter (in dB), then by a
//! modulation coefficient driven by a sine oscillator running at
//! `mod_rate`. At the default `mod_depth` of zero the effect is a plain gain.

use gainstage_component::parameters::{self, Flags, StaticInfoRef, TypeSpecificInfoRef};
use gainstage_component::{Component as ComponentT, ProcessingEnvironment};
use gainstage_host::Info;

mod effect;
mod oscillator;


pub use effect::decibels_to_gain;

const PARAMETERS: [StaticInfoRef; 4] = [
    StaticInfoRef {
        title: "Gain",
        short_title: "Gain",
        unique_id: "gain",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.0,
            valid_range: -60.0..=12.0,
            units: Some("dB"),
        },
    },
    StaticInfoRef {
        title: "Modulation Rate",
        short_title: "Rate",
        unique_id: "mod_rate",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 4.0,
            valid_range: 0.1..=20.0,
            units: Some("Hz"),
        },
    },
    StaticInfoRef {
        title: "Modulation Depth",
        short_title: "Depth",
        unique_id: "mod_depth",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.0,
            valid_range: 0.0..=100.0,
            units: Some("%"),
        },
    },
    StaticInfoRef {
        title: "Bypass",
        short_title: "Bypass",
        unique_id: "bypass",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Switch { default: false },
    },
];

/// How the effect presents itself to hosts.
pub const INFO: Info<'static> = Info {
    name: "Simple Gain",
    vendor: "gainstage",
    version: env!("CARGO_PKG_VERSION"),
    category: "Fx|Dynamics",
};

/// The simple gain effect.
#[derive(Clone, Debug, Default)]
pub struct Component {}

impl ComponentT for Component {
    type Processor = effect::Effect;

    fn parameter_infos(&self) -> Vec<parameters::Info> {
        parameters::to_infos(&PARAMETERS)
    }

    fn create_processor(&self, env: &ProcessingEnvironment) -> Self::Processor {
        effect::Effect::new(env)
    }
}
