use itertools::Either;

use super::super::{
    NumericBufferState, PiecewiseLinearCurve, PiecewiseLinearCurvePoint, SwitchBufferState,
    TimedSwitchValues, TimedValue,
};

fn curve_per_sample<I: IntoIterator<Item = PiecewiseLinearCurvePoint, IntoIter: Clone>>(
    curve: PiecewiseLinearCurve<I>,
) -> impl Iterator<Item = f32> + Clone {
    let buffer_size = curve.buffer_size();
    let mut points = curve.into_iter();
    // The first point is always at offset 0, so `from` is set before it's read.
    let mut from = PiecewiseLinearCurvePoint {
        sample_offset: 0,
        value: 0.0,
    };
    let mut to = points.next();
    (0..buffer_size).map(move |idx| match to.take() {
        Some(point) if point.sample_offset == idx => {
            from = point;
            to = points.next();
            from.value
        }
        Some(point) => {
            // Rounding errors are fixed up when we reach the next point.
            #[allow(clippy::cast_precision_loss)]
            let t = (idx - from.sample_offset) as f32
                / (point.sample_offset - from.sample_offset) as f32;
            let value = from.value + (point.value - from.value) * t;
            to = Some(point);
            value
        }
        None => from.value,
    })
}

fn timed_switch_per_sample<I: IntoIterator<Item = TimedValue<bool>, IntoIter: Clone>>(
    values: TimedSwitchValues<I>,
) -> impl Iterator<Item = bool> + Clone {
    let buffer_size = values.buffer_size();
    let mut points = values.into_iter();
    let mut current = false;
    let mut next = points.next();
    (0..buffer_size).map(move |idx| {
        if let Some(TimedValue {
            sample_offset,
            value,
        }) = next
        {
            if sample_offset == idx {
                current = value;
                next = points.next();
            }
        }
        current
    })
}

/// Converts a [`NumericBufferState`] into a per-sample iterator.
///
/// Constant states yield an infinite iterator; curves yield exactly one value
/// per frame of the block.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::{
/// #     numeric_per_sample, NumericBufferState, PiecewiseLinearCurve, PiecewiseLinearCurvePoint,
/// # };
/// let curve = PiecewiseLinearCurve::new(
///     vec![
///         PiecewiseLinearCurvePoint { sample_offset: 0, value: 0.0 },
///         PiecewiseLinearCurvePoint { sample_offset: 2, value: 1.0 },
///     ],
///     4,
///     0.0..=1.0,
/// )
/// .unwrap();
/// let values: Vec<_> = numeric_per_sample(NumericBufferState::PiecewiseLinear(curve)).collect();
/// assert_eq!(values, vec![0.0, 0.5, 1.0, 1.0]);
/// ```
pub fn numeric_per_sample<I: IntoIterator<Item = PiecewiseLinearCurvePoint, IntoIter: Clone>>(
    state: NumericBufferState<I>,
) -> impl Iterator<Item = f32> + Clone {
    match state {
        NumericBufferState::Constant(v) => Either::Left(std::iter::repeat(v)),
        NumericBufferState::PiecewiseLinear(c) => Either::Right(curve_per_sample(c)),
    }
}

/// Converts a [`SwitchBufferState`] into a per-sample iterator.
///
/// Constant states yield an infinite iterator; varying states yield exactly
/// one value per frame of the block.
pub fn switch_per_sample<I: IntoIterator<Item = TimedValue<bool>, IntoIter: Clone>>(
    state: SwitchBufferState<I>,
) -> impl Iterator<Item = bool> + Clone {
    match state {
        SwitchBufferState::Constant(v) => Either::Left(std::iter::repeat(v)),
        SwitchBufferState::Varying(c) => Either::Right(timed_switch_per_sample(c)),
    }
}
