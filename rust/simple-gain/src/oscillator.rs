//! A table-lookup sine oscillator used as the modulation source.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

#[cfg(test)]
mod tests;

const TABLE_SIZE: usize = 2048;

/// One cycle of a sine wave, sampled at `TABLE_SIZE` points.
///
/// The table is built once when the processor is created so that lookups
/// never allocate.
#[derive(Debug, Clone)]
pub struct SineTable {
    // One extra entry repeats the first so interpolation never wraps.
    values: Vec<f32>,
}

impl SineTable {
    pub fn new() -> Self {
        let values = (0..=TABLE_SIZE)
            .map(|i| (i as f64 / TABLE_SIZE as f64 * std::f64::consts::TAU).sin() as f32)
            .collect();
        Self { values }
    }

    /// The sine of `phase` cycles, for `phase` in `[0, 1)`.
    pub fn lookup(&self, phase: f32) -> f32 {
        let position = phase * TABLE_SIZE as f32;
        let index = (position as usize).min(TABLE_SIZE - 1);
        let fraction = position - index as f32;
        let (a, b) = (self.values[index], self.values[index + 1]);
        a + (b - a) * fraction
    }
}

impl Default for SineTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The running phase of a sine oscillator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Returns the current value, then advances by `increment` cycles.
    pub fn generate(&mut self, table: &SineTable, increment: f32) -> f32 {
        let value = table.lookup(self.phase);
        self.phase = (self.phase + increment.max(0.0)).fract();
        value
    }
}
