use std::{collections::HashMap, hash::BuildHasher};

use super::super::{IdHashMap, InfoRef, InternalValue, States, TypeSpecificInfoRef, hash_id};

/// The default value of a parameter.
#[must_use]
pub fn default_value(info: &TypeSpecificInfoRef<'_>) -> InternalValue {
    match info {
        TypeSpecificInfoRef::Numeric { default, .. } => InternalValue::Numeric(*default),
        TypeSpecificInfoRef::Switch { default } => InternalValue::Switch(*default),
    }
}

/// Builds a map of parameter values from the defaults in `infos`, replacing
/// any parameter that appears in `overrides`.
///
/// # Examples
///
/// ```
/// # use gainstage_component::parameters::{StaticInfoRef, InternalValue, TypeSpecificInfoRef, override_defaults};
/// # use std::collections::HashMap;
/// let infos = [
///     StaticInfoRef {
///         unique_id: "gain",
///         title: "Gain",
///         short_title: "Gain",
///         flags: Default::default(),
///         type_specific: TypeSpecificInfoRef::Numeric {
///             default: 0.0,
///             valid_range: -60.0..=12.0,
///             units: Some("dB"),
///         },
///     },
///     StaticInfoRef {
///         unique_id: "bypass",
///         title: "Bypass",
///         short_title: "Bypass",
///         flags: Default::default(),
///         type_specific: TypeSpecificInfoRef::Switch { default: false },
///     },
/// ];
/// let overrides = HashMap::from([("gain", InternalValue::Numeric(-6.0))]);
/// let values = override_defaults(infos.iter().cloned(), &overrides);
/// assert_eq!(values.get("gain"), Some(&InternalValue::Numeric(-6.0)));
/// assert_eq!(values.get("bypass"), Some(&InternalValue::Switch(false)));
/// ```
pub fn override_defaults<'a, H: BuildHasher>(
    infos: impl IntoIterator<Item = InfoRef<'a>>,
    overrides: &HashMap<&'_ str, InternalValue, H>,
) -> HashMap<String, InternalValue> {
    infos
        .into_iter()
        .map(|info| {
            let value = overrides
                .get(info.unique_id)
                .copied()
                .unwrap_or_else(|| default_value(&info.type_specific));
            (info.unique_id.to_owned(), value)
        })
        .collect()
}

/// Simple implementation of [`States`] backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct StatesMap {
    map: IdHashMap<InternalValue>,
}

impl<S: AsRef<str>> From<HashMap<S, InternalValue>> for StatesMap {
    fn from(map: HashMap<S, InternalValue>) -> Self {
        Self {
            map: map
                .into_iter()
                .map(|(k, v)| (hash_id(k.as_ref()), v))
                .collect(),
        }
    }
}

impl StatesMap {
    /// All parameters at their defaults, except those in `overrides`.
    pub fn new_override_defaults<'a>(
        infos: impl IntoIterator<Item = InfoRef<'a>>,
        overrides: &HashMap<&'_ str, InternalValue>,
    ) -> Self {
        override_defaults(infos, overrides).into()
    }

    /// All parameters at their defaults.
    pub fn new_defaults<'a>(infos: impl IntoIterator<Item = InfoRef<'a>>) -> Self {
        Self::new_override_defaults(infos, &HashMap::new())
    }
}

impl States for StatesMap {
    fn get_by_hash(&self, id_hash: super::super::IdHash) -> Option<InternalValue> {
        self.map.get(&id_hash).copied()
    }
}
