use assert_approx_eq::assert_approx_eq;

use super::{Oscillator, SineTable};

#[test]
fn table_matches_sine() {
    let table = SineTable::new();
    for i in 0..1000 {
        let phase = i as f32 / 1000.0;
        assert_approx_eq!(
            table.lookup(phase),
            (phase * std::f32::consts::TAU).sin(),
            1e-5
        );
    }
}

#[test]
fn quarter_cycles() {
    let table = SineTable::new();
    let mut oscillator = Oscillator::default();
    let values: Vec<_> = (0..5).map(|_| oscillator.generate(&table, 0.25)).collect();
    for (actual, expected) in values.into_iter().zip([0.0, 1.0, 0.0, -1.0, 0.0]) {
        assert_approx_eq!(actual, expected, 1e-6);
    }
}

#[test]
fn large_increments_wrap() {
    let table = SineTable::new();
    let mut oscillator = Oscillator::default();
    oscillator.generate(&table, 2.25);
    assert_approx_eq!(oscillator.generate(&table, 0.0), 1.0, 1e-6);
}

#[test]
fn reset_restarts_the_cycle() {
    let table = SineTable::new();
    let mut oscillator = Oscillator::default();
    let first: Vec<_> = (0..7).map(|_| oscillator.generate(&table, 0.1)).collect();
    oscillator.reset();
    let second: Vec<_> = (0..7).map(|_| oscillator.generate(&table, 0.1)).collect();
    assert_eq!(first, second);
}
