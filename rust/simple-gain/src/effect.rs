use gainstage_component::{
    ProcessingEnvironment, Processor,
    audio::{Buffer, BufferMut, channels, channels_mut},
    effect::Effect as EffectT,
    parameters::{self, BufferStates, NumericBufferState},
    pzip,
};

use crate::oscillator::{Oscillator, SineTable};


const PERCENT_SCALE: f32 = 1. / 100.;

/// Converts a level in decibels to a linear gain factor.
///
/// Anything at or below -100 dB is treated as silence.
///
/// # Examples
///
/// ```
/// # use assert_approx_eq::assert_approx_eq;
/// # use simple_gain::decibels_to_gain;
/// assert_eq!(decibels_to_gain(0.0), 1.0);
/// assert_approx_eq!(decibels_to_gain(-20.0), 0.1);
/// assert_eq!(decibels_to_gain(-100.0), 0.0);
/// ```
#[must_use]
pub fn decibels_to_gain(db: f32) -> f32 {
    if db <= -100.0 {
        0.0
    } else {
        10f32.powf(db * 0.05)
    }
}

/// Amplitude coefficient for a modulator output of `sine` in `[-1, 1]`.
///
/// Swings between `1 - depth` and `1`; zero depth leaves the signal untouched.
fn modulation(sine: f32, depth: f32) -> f32 {
    1.0 - depth * (1.0 - sine) * 0.5
}

#[derive(Debug, Clone)]
pub struct Effect {
    table: SineTable,
    oscillator: Oscillator,
    rate_to_increment: f32,
}

impl Effect {
    pub fn new(env: &ProcessingEnvironment) -> Self {
        Self {
            table: SineTable::new(),
            oscillator: Oscillator::default(),
            rate_to_increment: 1.0 / env.sampling_rate,
        }
    }
}

impl Processor for Effect {
    fn set_processing(&mut self, processing: bool) {
        if !processing {
            self.oscillator.reset();
        }
    }
}

impl EffectT for Effect {
    fn handle_parameters<P: parameters::States>(&mut self, _: P) {}

    fn process<P: BufferStates, I: Buffer, O: BufferMut>(
        &mut self,
        parameters: P,
        input: &I,
        output: &mut O,
    ) {
        debug_assert_eq!(input.channel_layout(), output.channel_layout());
        debug_assert_eq!(input.num_frames(), output.num_frames());

        // A gain that holds still needs converting only once per block.
        let constant_gain = match parameters.get_numeric("gain") {
            Some(NumericBufferState::Constant(db)) => Some(decibels_to_gain(db)),
            _ => None,
        };

        // Every channel sees the same modulation, so each one replays the
        // oscillator from where the last block left it.
        let start = self.oscillator;
        for (input_channel, output_channel) in channels(input).zip(channels_mut(output)) {
            let mut oscillator = start;
            for ((gain, rate, depth, bypass), (i, o)) in pzip!(parameters[
                numeric "gain",
                numeric "mod_rate",
                numeric "mod_depth",
                switch "bypass"
            ])
            .zip(input_channel.iter().zip(output_channel.iter_mut()))
            {
                // The modulator keeps running while bypassed.
                let sine = oscillator.generate(&self.table, rate * self.rate_to_increment);
                *o = if bypass {
                    *i
                } else {
                    let gain = constant_gain.unwrap_or_else(|| decibels_to_gain(gain));
                    *i * gain * modulation(sine, depth * PERCENT_SCALE)
                };
            }
            self.oscillator = oscillator;
        }
    }
}
