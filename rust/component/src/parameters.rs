//! Code related to the _parameters_ of a processor.
//!
//! Parameters form the "logical interface" of an effect. Their values are
//! owned by the host, with changes coming either from a UI or from automation,
//! and are handed to the processor during processing.
//!
//! Each parameter is one of the following types:
//!
//! - Numeric: a value that can vary continuously within a range.
//! - Switch: a value that can be either on or off.
//!
//! Components declare their parameters in [`crate::Component::parameter_infos`].
//! During [`crate::effect::Effect::process`] the processor receives the state of
//! every parameter across the block as a [`BufferStates`]; outside of
//! processing it receives point-in-time [`States`] in
//! [`crate::effect::Effect::handle_parameters`].

use std::{collections::HashMap, ops::RangeInclusive};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

mod utils;


pub use utils::*;

/// Information specific to a certain type of parameter.
///
/// This is a non-owning reference type, pointing to data with lifetime `'a`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecificInfoRef<'a> {
    /// A numeric parameter.
    Numeric {
        /// The default value, which must lie within `valid_range`.
        default: f32,

        /// The valid range of the parameter.
        valid_range: RangeInclusive<f32>,

        /// The logical units of the parameter, e.g., `"dB"`. `None` for unitless values.
        units: Option<&'a str>,
    },

    /// A switch parameter.
    Switch {
        /// The default value.
        default: bool,
    },
}

/// Owning version of [`TypeSpecificInfoRef`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecificInfo {
    /// A numeric parameter.
    Numeric {
        /// The default value, which must lie within `valid_range`.
        default: f32,

        /// The valid range of the parameter.
        valid_range: RangeInclusive<f32>,

        /// The logical units of the parameter.
        units: Option<String>,
    },

    /// A switch parameter.
    Switch {
        /// The default value.
        default: bool,
    },
}

impl From<&TypeSpecificInfoRef<'_>> for TypeSpecificInfo {
    fn from(v: &TypeSpecificInfoRef<'_>) -> Self {
        match v {
            TypeSpecificInfoRef::Numeric {
                default,
                valid_range,
                units,
            } => TypeSpecificInfo::Numeric {
                default: *default,
                valid_range: valid_range.clone(),
                units: units.map(ToOwned::to_owned),
            },
            TypeSpecificInfoRef::Switch { default } => {
                TypeSpecificInfo::Switch { default: *default }
            }
        }
    }
}

impl<'a> From<&'a TypeSpecificInfo> for TypeSpecificInfoRef<'a> {
    fn from(v: &'a TypeSpecificInfo) -> Self {
        match v {
            TypeSpecificInfo::Numeric {
                default,
                valid_range,
                units,
            } => TypeSpecificInfoRef::Numeric {
                default: *default,
                valid_range: valid_range.clone(),
                units: units.as_deref(),
            },
            TypeSpecificInfo::Switch { default } => {
                TypeSpecificInfoRef::Switch { default: *default }
            }
        }
    }
}

/// Metadata about a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Whether hosts should offer this parameter for automation.
    pub automatable: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Flags { automatable: true }
    }
}

/// Information about a parameter.
///
/// This is a non-owning reference type; static tables can use [`StaticInfoRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct InfoRef<'a> {
    /// The unique ID of the parameter, used to refer to it in code.
    ///
    /// Must be unique among a component's parameters.
    pub unique_id: &'a str,

    /// Human-readable title of the parameter.
    pub title: &'a str,

    /// An abbreviated title, for hosts with little room.
    pub short_title: &'a str,

    /// Metadata about the parameter.
    pub flags: Flags,

    /// Information specific to the type of parameter.
    pub type_specific: TypeSpecificInfoRef<'a>,
}

/// Owning version of [`InfoRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// See [`InfoRef::unique_id`].
    pub unique_id: String,

    /// See [`InfoRef::title`].
    pub title: String,

    /// See [`InfoRef::short_title`].
    pub short_title: String,

    /// See [`InfoRef::flags`].
    pub flags: Flags,

    /// See [`InfoRef::type_specific`].
    pub type_specific: TypeSpecificInfo,
}

impl From<&InfoRef<'_>> for Info {
    fn from(v: &InfoRef<'_>) -> Self {
        Info {
            unique_id: v.unique_id.to_owned(),
            title: v.title.to_owned(),
            short_title: v.short_title.to_owned(),
            flags: v.flags.clone(),
            type_specific: (&v.type_specific).into(),
        }
    }
}

impl<'a> From<&'a Info> for InfoRef<'a> {
    fn from(v: &'a Info) -> Self {
        InfoRef {
            unique_id: &v.unique_id,
            title: &v.title,
            short_title: &v.short_title,
            flags: v.flags.clone(),
            type_specific: (&v.type_specific).into(),
        }
    }
}

/// [`InfoRef`] of static data.
pub type StaticInfoRef = InfoRef<'static>;

/// Converts a slice of [`InfoRef`]s to a vector of [`Info`]s.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::{StaticInfoRef, TypeSpecificInfoRef, to_infos};
/// let infos = to_infos(&[StaticInfoRef {
///     unique_id: "bypass",
///     title: "Bypass",
///     short_title: "Bypass",
///     flags: Default::default(),
///     type_specific: TypeSpecificInfoRef::Switch { default: false },
/// }]);
/// assert_eq!(infos[0].unique_id, "bypass");
/// ```
pub fn to_infos(v: &[InfoRef<'_>]) -> Vec<Info> {
    v.iter().map(Into::into).collect()
}

/// A numeric hash of a parameter's ID.
///
/// On the audio thread, parameters are looked up by this hash rather than
/// by their string ID.
#[derive(Eq, Hash, PartialEq, Clone, Copy, Debug)]
pub struct IdHash {
    internal_hash: u32,
}

impl IdHash {
    #[doc(hidden)]
    #[must_use]
    pub fn internal_hash(&self) -> u32 {
        self.internal_hash
    }
}

/// Creates a hash from a unique ID.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::hash_id;
/// assert_eq!(hash_id("gain"), hash_id("gain"));
/// assert_ne!(hash_id("gain"), hash_id("bypass"));
/// ```
#[must_use]
pub fn hash_id(unique_id: &str) -> IdHash {
    IdHash {
        internal_hash: fxhash::hash32(unique_id) & 0x7fff_ffff,
    }
}

/// A map keyed by [`IdHash`].
pub type IdHashMap<V> = HashMap<IdHash, V, fxhash::FxBuildHasher>;

/// A value of a parameter, as used in performance-critical contexts.
#[derive(Debug, Clone, PartialEq, Copy)]
pub enum InternalValue {
    /// A numeric value.
    Numeric(f32),

    /// A switch value.
    Switch(bool),
}

/// A value of a parameter, as exchanged with UIs and hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value.
    Numeric(f32),

    /// A switch value.
    Switch(bool),
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Numeric(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Switch(v)
    }
}

impl From<InternalValue> for Value {
    fn from(v: InternalValue) -> Self {
        match v {
            InternalValue::Numeric(n) => Value::Numeric(n),
            InternalValue::Switch(s) => Value::Switch(s),
        }
    }
}

impl From<&Value> for InternalValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Numeric(n) => InternalValue::Numeric(*n),
            Value::Switch(s) => InternalValue::Switch(*s),
        }
    }
}

/// A snapshot of all parameters at a single point in time.
///
/// This is what [`crate::effect::Effect::handle_parameters`] receives. The
/// typed getters return `None` when the parameter is missing or has a
/// different type.
pub trait States {
    /// Get the current value of a parameter by its hashed unique ID.
    fn get_by_hash(&self, id_hash: IdHash) -> Option<InternalValue>;

    /// Get the current value of a parameter by its unique ID.
    fn get(&self, unique_id: &str) -> Option<InternalValue> {
        self.get_by_hash(hash_id(unique_id))
    }

    /// Get a numeric parameter by its hashed unique ID.
    fn numeric_by_hash(&self, id_hash: IdHash) -> Option<f32> {
        match self.get_by_hash(id_hash) {
            Some(InternalValue::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    /// Get a numeric parameter by its unique ID.
    fn get_numeric(&self, unique_id: &str) -> Option<f32> {
        self.numeric_by_hash(hash_id(unique_id))
    }

    /// Get a switch parameter by its hashed unique ID.
    fn switch_by_hash(&self, id_hash: IdHash) -> Option<bool> {
        match self.get_by_hash(id_hash) {
            Some(InternalValue::Switch(v)) => Some(v),
            _ => None,
        }
    }

    /// Get a switch parameter by its unique ID.
    fn get_switch(&self, unique_id: &str) -> Option<bool> {
        self.switch_by_hash(hash_id(unique_id))
    }
}

impl<S: States + ?Sized> States for &S {
    fn get_by_hash(&self, id_hash: IdHash) -> Option<InternalValue> {
        (**self).get_by_hash(id_hash)
    }
}

/// A point on a [`PiecewiseLinearCurve`].
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinearCurvePoint {
    /// The frame this point falls on.
    pub sample_offset: usize,

    /// The value of the parameter at that frame.
    pub value: f32,
}

/// A value that is set at a certain frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedValue<V> {
    /// The frame at which `value` takes effect.
    pub sample_offset: usize,

    /// The new value.
    pub value: V,
}

fn check_offsets<V: PartialOrd>(
    points: impl Iterator<Item = (usize, V)>,
    buffer_size: usize,
    valid_range: &RangeInclusive<V>,
) -> bool {
    let mut last = None;
    for (sample_offset, value) in points {
        if sample_offset >= buffer_size || !valid_range.contains(&value) {
            return false;
        }
        match last {
            None if sample_offset != 0 => return false,
            Some(l) if sample_offset <= l => return false,
            _ => {}
        }
        last = Some(sample_offset);
    }
    last.is_some()
}

/// A numeric value that moves linearly from point to point across a block.
///
/// Invariants, checked on construction:
///  - there is at least one point, and the first is at `sample_offset` 0,
///  - `sample_offset`s strictly increase and stay inside the block,
///  - every `value` lies within the parameter's valid range.
///
/// After the last point, the value holds until the end of the block.
#[derive(Debug, Clone)]
pub struct PiecewiseLinearCurve<I> {
    points: I,
    buffer_size: usize,
}

impl<I: IntoIterator<Item = PiecewiseLinearCurvePoint> + Clone> PiecewiseLinearCurve<I> {
    /// Creates a curve, or `None` if `points` break the invariants.
    pub fn new(points: I, buffer_size: usize, valid_range: RangeInclusive<f32>) -> Option<Self> {
        check_offsets(
            points
                .clone()
                .into_iter()
                .map(|p| (p.sample_offset, p.value)),
            buffer_size,
            &valid_range,
        )
        .then_some(Self {
            points,
            buffer_size,
        })
    }
}

impl<I> PiecewiseLinearCurve<I> {
    /// The number of frames in the block this curve spans.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl<I: IntoIterator<Item = PiecewiseLinearCurvePoint>> IntoIterator for PiecewiseLinearCurve<I> {
    type Item = PiecewiseLinearCurvePoint;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// A switch value that changes at given frames of a block.
///
/// Same invariants as [`PiecewiseLinearCurve`], without interpolation:
/// each value holds until the next point.
#[derive(Debug, Clone)]
pub struct TimedSwitchValues<I> {
    points: I,
    buffer_size: usize,
}

impl<I: IntoIterator<Item = TimedValue<bool>> + Clone> TimedSwitchValues<I> {
    /// Creates the timeline, or `None` if `points` break the invariants.
    pub fn new(points: I, buffer_size: usize) -> Option<Self> {
        check_offsets(
            points
                .clone()
                .into_iter()
                .map(|p| (p.sample_offset, p.value)),
            buffer_size,
            &(false..=true),
        )
        .then_some(Self {
            points,
            buffer_size,
        })
    }
}

impl<I> TimedSwitchValues<I> {
    /// The number of frames in the block these values span.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl<I: IntoIterator<Item = TimedValue<bool>>> IntoIterator for TimedSwitchValues<I> {
    type Item = TimedValue<bool>;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// The state of a numeric parameter across a block.
pub enum NumericBufferState<I> {
    /// The value does not change during the block.
    Constant(f32),

    /// The value follows a curve.
    PiecewiseLinear(PiecewiseLinearCurve<I>),
}

impl<I: IntoIterator<Item = PiecewiseLinearCurvePoint>> NumericBufferState<I> {
    /// The value on the first frame of the block.
    #[allow(clippy::missing_panics_doc)] // Only panics when invariants are broken.
    pub fn value_at_start_of_buffer(self) -> f32 {
        match self {
            NumericBufferState::Constant(v) => v,
            NumericBufferState::PiecewiseLinear(c) => c.into_iter().next().unwrap().value,
        }
    }
}

/// The state of a switch parameter across a block.
pub enum SwitchBufferState<I> {
    /// The value does not change during the block.
    Constant(bool),

    /// The value changes at certain frames.
    Varying(TimedSwitchValues<I>),
}

impl<I: IntoIterator<Item = TimedValue<bool>>> SwitchBufferState<I> {
    /// The value on the first frame of the block.
    #[allow(clippy::missing_panics_doc)] // Only panics when invariants are broken.
    pub fn value_at_start_of_buffer(self) -> bool {
        match self {
            SwitchBufferState::Constant(v) => v,
            SwitchBufferState::Varying(v) => v.into_iter().next().unwrap().value,
        }
    }
}

/// The state of any parameter across a block.
pub enum BufferState<N, S> {
    /// A numeric parameter.
    Numeric(NumericBufferState<N>),

    /// A switch parameter.
    Switch(SwitchBufferState<S>),
}

/// The state of all parameters across a block.
///
/// Each parameter is marked as constant or varying, so processors can
/// skip per-sample work in the common constant case.
pub trait BufferStates {
    /// Get the state of a parameter by its hashed unique ID.
    fn get_by_hash(
        &self,
        id_hash: IdHash,
    ) -> Option<
        BufferState<
            impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone,
            impl Iterator<Item = TimedValue<bool>> + Clone,
        >,
    >;

    /// Get the state of a parameter by its unique ID.
    fn get(
        &self,
        unique_id: &str,
    ) -> Option<
        BufferState<
            impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone,
            impl Iterator<Item = TimedValue<bool>> + Clone,
        >,
    > {
        self.get_by_hash(hash_id(unique_id))
    }

    /// Get the state of a numeric parameter by its hashed unique ID.
    fn numeric_by_hash(
        &self,
        id_hash: IdHash,
    ) -> Option<NumericBufferState<impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone>> {
        match self.get_by_hash(id_hash) {
            Some(BufferState::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    /// Get the state of a numeric parameter by its unique ID.
    fn get_numeric(
        &self,
        unique_id: &str,
    ) -> Option<NumericBufferState<impl Iterator<Item = PiecewiseLinearCurvePoint> + Clone>> {
        self.numeric_by_hash(hash_id(unique_id))
    }

    /// Get the state of a switch parameter by its hashed unique ID.
    fn switch_by_hash(
        &self,
        id_hash: IdHash,
    ) -> Option<SwitchBufferState<impl Iterator<Item = TimedValue<bool>> + Clone>> {
        match self.get_by_hash(id_hash) {
            Some(BufferState::Switch(v)) => Some(v),
            _ => None,
        }
    }

    /// Get the state of a switch parameter by its unique ID.
    fn get_switch(
        &self,
        unique_id: &str,
    ) -> Option<SwitchBufferState<impl Iterator<Item = TimedValue<bool>> + Clone>> {
        self.switch_by_hash(hash_id(unique_id))
    }
}
