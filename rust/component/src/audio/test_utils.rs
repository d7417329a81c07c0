//! Signal generators only useful for tests.

#![allow(clippy::cast_possible_truncation)]

/// A unit-amplitude sine wave of `len` samples.
///
/// `increment` is the frequency as a fraction of the sampling rate.
#[must_use]
pub fn sine(len: usize, increment: f32) -> Vec<f32> {
    let increment = f64::from(increment) * std::f64::consts::TAU;
    let mut phase = 0f64;
    std::iter::repeat_with(|| {
        let sample = phase.sin() as f32;
        phase += increment;
        sample
    })
    .take(len)
    .collect()
}
