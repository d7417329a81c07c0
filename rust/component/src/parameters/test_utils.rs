//! [`BufferStates`] implementations for exercising processors in tests.

use std::{collections::HashMap, ops::RangeInclusive};

use super::{
    BufferState, BufferStates, IdHash, IdHashMap, InfoRef, InternalValue, NumericBufferState,
    PiecewiseLinearCurve, PiecewiseLinearCurvePoint, SwitchBufferState, TimedSwitchValues,
    TimedValue, TypeSpecificInfoRef, default_value, hash_id,
};

#[derive(Clone, Debug)]
enum RampedState {
    Constant(InternalValue),
    RampedNumeric {
        start: f32,
        end: f32,
        range: RangeInclusive<f32>,
    },
    RampedSwitch {
        start: bool,
        end: bool,
    },
}

/// Parameters that move from a start value to an end value over one block.
///
/// Numeric parameters ramp linearly from the first frame to the last.
/// Switch parameters flip halfway through the block.
#[derive(Clone, Debug, Default)]
pub struct RampedStatesMap {
    buffer_size: usize,
    map: IdHashMap<RampedState>,
}

fn ramped_state(
    info: &TypeSpecificInfoRef<'_>,
    start: Option<InternalValue>,
    end: Option<InternalValue>,
    buffer_size: usize,
) -> RampedState {
    let default = default_value(info);
    match (info, start.unwrap_or(default), end.unwrap_or(default)) {
        // Blocks too short to ramp over hold the start value.
        (_, start, end) if start == end || buffer_size < 2 => RampedState::Constant(start),
        (
            TypeSpecificInfoRef::Numeric { valid_range, .. },
            InternalValue::Numeric(start),
            InternalValue::Numeric(end),
        ) => RampedState::RampedNumeric {
            start,
            end,
            range: valid_range.clone(),
        },
        (
            TypeSpecificInfoRef::Switch { .. },
            InternalValue::Switch(start),
            InternalValue::Switch(end),
        ) => RampedState::RampedSwitch { start, end },
        _ => panic!("override does not match the parameter type"),
    }
}

impl RampedStatesMap {
    /// Creates a map ramping each parameter from `start_overrides` to
    /// `end_overrides`, falling back to the default for either end.
    ///
    /// # Panics
    ///
    /// Panics if an override has a different type than its parameter.
    pub fn new<'a>(
        infos: impl IntoIterator<Item = InfoRef<'a>>,
        start_overrides: &HashMap<&'_ str, InternalValue>,
        end_overrides: &HashMap<&'_ str, InternalValue>,
        buffer_size: usize,
    ) -> Self {
        let map = infos
            .into_iter()
            .map(|info| {
                let state = ramped_state(
                    &info.type_specific,
                    start_overrides.get(info.unique_id).copied(),
                    end_overrides.get(info.unique_id).copied(),
                    buffer_size,
                );
                (hash_id(info.unique_id), state)
            })
            .collect();
        Self { buffer_size, map }
    }

    /// Creates a map where every parameter holds still.
    pub fn new_const<'a>(
        infos: impl IntoIterator<Item = InfoRef<'a>>,
        overrides: &HashMap<&'_ str, InternalValue>,
    ) -> Self {
        Self::new(infos, overrides, overrides, 0)
    }
}

fn ramp_numeric(
    start: f32,
    end: f32,
    buffer_size: usize,
) -> impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone {
    [(0, start), (buffer_size - 1, end)]
        .into_iter()
        .map(|(sample_offset, value)| PiecewiseLinearCurvePoint {
            sample_offset,
            value,
        })
}

fn ramp_switch(
    start: bool,
    end: bool,
    buffer_size: usize,
) -> impl Iterator<Item = TimedValue<bool>> + Clone {
    [(0, start), (buffer_size / 2, end)]
        .into_iter()
        .map(|(sample_offset, value)| TimedValue {
            sample_offset,
            value,
        })
}

impl BufferStates for RampedStatesMap {
    fn get_by_hash(
        &self,
        id_hash: IdHash,
    ) -> Option<
        BufferState<
            impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone,
            impl Iterator<Item = TimedValue<bool>> + Clone,
        >,
    > {
        match self.map.get(&id_hash)? {
            RampedState::Constant(InternalValue::Numeric(n)) => {
                Some(BufferState::Numeric(NumericBufferState::Constant(*n)))
            }
            RampedState::Constant(InternalValue::Switch(s)) => {
                Some(BufferState::Switch(SwitchBufferState::Constant(*s)))
            }
            RampedState::RampedNumeric { start, end, range } => Some(BufferState::Numeric(
                NumericBufferState::PiecewiseLinear(PiecewiseLinearCurve::new(
                    ramp_numeric(*start, *end, self.buffer_size),
                    self.buffer_size,
                    range.clone(),
                )?),
            )),
            RampedState::RampedSwitch { start, end } => Some(BufferState::Switch(
                SwitchBufferState::Varying(TimedSwitchValues::new(
                    ramp_switch(*start, *end, self.buffer_size),
                    self.buffer_size,
                )?),
            )),
        }
    }
}
