use std::collections::HashMap;

use super::super::{
    BufferState, BufferStates, IdHash, InfoRef, InternalValue, NumericBufferState,
    PiecewiseLinearCurvePoint, States, SwitchBufferState, TimedValue,
};
use super::states_map::StatesMap;

/// Implementation of [`BufferStates`] where every parameter holds its
/// value for the whole block.
///
/// Hosts use this when parameters only change between blocks, and tests use
/// it to drive an effect without a host.
#[derive(Clone, Debug, Default)]
pub struct ConstantBufferStates<S> {
    s: S,
}

impl<S: States> BufferStates for ConstantBufferStates<S> {
    fn get_by_hash(
        &self,
        id_hash: IdHash,
    ) -> Option<
        BufferState<
            impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone,
            impl Iterator<Item = TimedValue<bool>> + Clone,
        >,
    > {
        match self.s.get_by_hash(id_hash)? {
            InternalValue::Numeric(n) => Some(BufferState::Numeric(NumericBufferState::<
                std::iter::Empty<PiecewiseLinearCurvePoint>,
            >::Constant(n))),
            InternalValue::Switch(s) => Some(BufferState::Switch(SwitchBufferState::<
                std::iter::Empty<TimedValue<bool>>,
            >::Constant(s))),
        }
    }
}

impl<S: States> ConstantBufferStates<S> {
    /// Wraps point-in-time `States` as constant across a block.
    pub fn new(s: S) -> Self {
        Self { s }
    }
}

impl ConstantBufferStates<StatesMap> {
    /// All parameters at their defaults, except those in `overrides`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gainstage_component::parameters::{StaticInfoRef, InternalValue, TypeSpecificInfoRef, ConstantBufferStates, BufferStates, NumericBufferState};
    /// let infos = vec![StaticInfoRef {
    ///     unique_id: "gain",
    ///     title: "Gain",
    ///     short_title: "Gain",
    ///     flags: Default::default(),
    ///     type_specific: TypeSpecificInfoRef::Numeric {
    ///         default: 0.0,
    ///         valid_range: -60.0..=12.0,
    ///         units: Some("dB"),
    ///     },
    /// }];
    /// let overrides = vec![("gain", InternalValue::Numeric(-3.0))].into_iter().collect();
    /// let states = ConstantBufferStates::new_override_defaults(infos, &overrides);
    /// match states.get_numeric("gain") {
    ///     Some(NumericBufferState::Constant(v)) => assert_eq!(v, -3.0),
    ///     _ => panic!("expected a constant"),
    /// }
    /// ```
    pub fn new_override_defaults<'a>(
        infos: impl IntoIterator<Item = InfoRef<'a>>,
        overrides: &HashMap<&'_ str, InternalValue>,
    ) -> Self {
        Self::new(StatesMap::new_override_defaults(infos, overrides))
    }

    /// All parameters at their defaults.
    pub fn new_defaults<'a>(infos: impl IntoIterator<Item = InfoRef<'a>>) -> Self {
        Self::new(StatesMap::new_defaults(infos))
    }
}
