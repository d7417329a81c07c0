//! Parameter values shared between the main thread and the audio thread.

use std::{
    collections::{HashMap, hash_map},
    sync::{
        Arc, Mutex, PoisonError, Weak,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
};

use gainstage_component::parameters::{
    self as cp, ConstantBufferStates, Info, InfoRef, InternalValue, TypeSpecificInfo,
    TypeSpecificInfoRef, Value,
};

use crate::parameters::{convert, normalize};


enum AtomicValue {
    Numeric(AtomicU32),
    Switch(AtomicBool),
}

impl AtomicValue {
    fn new(info: &TypeSpecificInfoRef<'_>) -> Self {
        match info {
            TypeSpecificInfoRef::Numeric { default, .. } => {
                AtomicValue::Numeric(AtomicU32::new(default.to_bits()))
            }
            TypeSpecificInfoRef::Switch { default } => {
                AtomicValue::Switch(AtomicBool::new(*default))
            }
        }
    }

    // Each parameter is independent, so there is nothing to order against.
    fn load(&self) -> InternalValue {
        match self {
            AtomicValue::Numeric(n) => {
                InternalValue::Numeric(f32::from_bits(n.load(Ordering::Relaxed)))
            }
            AtomicValue::Switch(s) => InternalValue::Switch(s.load(Ordering::Relaxed)),
        }
    }

    fn store(&self, value: InternalValue) -> bool {
        match (self, value) {
            (AtomicValue::Numeric(n), InternalValue::Numeric(v)) => {
                n.store(v.to_bits(), Ordering::Relaxed);
                true
            }
            (AtomicValue::Switch(s), InternalValue::Switch(v)) => {
                s.store(v, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }
}

/// Receives changes made through a [`MainStore`].
pub trait Listener: Send + Sync {
    /// Called after a parameter has been set successfully.
    fn parameter_changed(&self, unique_id: &str, value: &Value);
}

/// Errors from [`MainStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// No parameter has the given id.
    #[error("parameter not found")]
    NotFound,

    /// The value has a different type than the parameter.
    #[error("value has the wrong type for this parameter")]
    WrongType,

    /// The value is outside the parameter's valid range, or not finite.
    #[error("value is out of range")]
    InvalidValue,
}

/// The main-thread side of the parameter store (see [`create_stores`]).
///
/// This is `Send + Sync`, so UIs and automation sources can share it
/// behind an `Arc`.
pub struct MainStore {
    data: Arc<cp::IdHashMap<AtomicValue>>,
    infos: HashMap<String, Info>,
    listener: Mutex<Option<Weak<dyn Listener>>>,
}

/// The audio-thread side of the parameter store (see [`create_stores`]).
///
/// Reading values never allocates or blocks.
pub struct ProcessingStore {
    data: Arc<cp::IdHashMap<AtomicValue>>,
    snapshot: Snapshot,
}

/// Every parameter's value, loaded from the store at one instant.
///
/// Storage is allocated with the store and refreshed in place by
/// [`ProcessingStore::buffer_states`].
pub struct Snapshot {
    values: cp::IdHashMap<InternalValue>,
}

/// Creates the two sides of a parameter store, with every parameter at its
/// default value.
///
/// Values written through the [`MainStore`] become visible through the
/// [`ProcessingStore`]. The two may be used from different threads
/// concurrently.
///
/// # Panics
///
/// Panics if two parameters share an id, or if two ids hash to the same
/// [`cp::IdHash`].
pub fn create_stores<'a>(
    infos: impl IntoIterator<Item = InfoRef<'a>>,
) -> (MainStore, ProcessingStore) {
    let mut data = cp::IdHashMap::default();
    let mut owned_infos = HashMap::new();
    for info in infos {
        match data.entry(cp::hash_id(info.unique_id)) {
            hash_map::Entry::Occupied(_) => {
                panic!(
                    "Duplicate parameter ID hash for `{}`! This could be caused by duplicate parameter IDs or a hash collision.",
                    info.unique_id
                );
            }
            hash_map::Entry::Vacant(v) => {
                v.insert(AtomicValue::new(&info.type_specific));
            }
        }
        owned_infos.insert(info.unique_id.to_owned(), Info::from(&info));
    }
    let snapshot = Snapshot {
        values: data.iter().map(|(hash, value)| (*hash, value.load())).collect(),
    };
    let data = Arc::new(data);
    (
        MainStore {
            data: data.clone(),
            infos: owned_infos,
            listener: Mutex::new(None),
        },
        ProcessingStore { data, snapshot },
    )
}

fn check_value(info: &TypeSpecificInfo, value: &Value) -> Result<InternalValue, SetError> {
    match (info, value) {
        (TypeSpecificInfo::Numeric { valid_range, .. }, Value::Numeric(v)) => {
            if valid_range.contains(v) {
                Ok(InternalValue::Numeric(*v))
            } else {
                Err(SetError::InvalidValue)
            }
        }
        (TypeSpecificInfo::Switch { .. }, Value::Switch(v)) => Ok(InternalValue::Switch(*v)),
        _ => Err(SetError::WrongType),
    }
}

impl MainStore {
    /// The current value of a parameter.
    #[must_use]
    pub fn get(&self, unique_id: &str) -> Option<Value> {
        self.data
            .get(&cp::hash_id(unique_id))
            .map(|v| v.load().into())
    }

    /// Information about a parameter.
    #[must_use]
    pub fn get_info(&self, unique_id: &str) -> Option<Info> {
        self.infos.get(unique_id).cloned()
    }

    /// Every parameter known to the store, in no particular order.
    pub fn infos(&self) -> impl Iterator<Item = &Info> {
        self.infos.values()
    }

    /// Set a parameter value.
    ///
    /// # Errors
    ///
    ///  - Returns `NotFound` if no parameter with the given `unique_id` is in the store.
    ///  - Returns `WrongType` if the parameter with the given `unique_id` does not have a type that matches `value`.
    ///  - Returns `InvalidValue` if `value` is outside the valid range of the parameter (this includes `NaN`).
    pub fn set(&self, unique_id: &str, value: Value) -> Result<(), SetError> {
        self.store_value(unique_id, &value).inspect_err(|e| {
            log::warn!("Rejected value {value:?} for parameter `{unique_id}`: {e}");
        })
    }

    fn store_value(&self, unique_id: &str, value: &Value) -> Result<(), SetError> {
        let info = self.infos.get(unique_id).ok_or(SetError::NotFound)?;
        let internal = check_value(&info.type_specific, value)?;
        let stored = self
            .data
            .get(&cp::hash_id(unique_id))
            .is_some_and(|atomic| atomic.store(internal));
        debug_assert!(stored);
        self.notify(unique_id, value);
        Ok(())
    }

    /// The value of a parameter, normalized to `[0, 1]`.
    #[must_use]
    pub fn get_normalized(&self, unique_id: &str) -> Option<f64> {
        let info = self.infos.get(unique_id)?;
        normalize(&info.type_specific, &self.get(unique_id)?)
    }

    /// Set a parameter from a normalized value, as sent by automation.
    ///
    /// Values outside `[0, 1]` are clamped.
    ///
    /// # Errors
    ///
    ///  - Returns `NotFound` if no parameter with the given `unique_id` is in the store.
    ///  - Returns `InvalidValue` if `normalized` is not finite.
    pub fn set_normalized(&self, unique_id: &str, normalized: f64) -> Result<(), SetError> {
        self.infos
            .get(unique_id)
            .ok_or(SetError::NotFound)
            .and_then(|info| {
                if normalized.is_finite() {
                    self.store_value(unique_id, &convert(&info.type_specific, normalized))
                } else {
                    Err(SetError::InvalidValue)
                }
            })
            .inspect_err(|e| {
                log::warn!("Rejected normalized value {normalized} for parameter `{unique_id}`: {e}");
            })
    }

    /// Note that there can only be one listener at a time!
    pub fn set_listener(&self, listener: Weak<dyn Listener>) {
        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    fn notify(&self, unique_id: &str, value: &Value) {
        let listener = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(listener) = listener {
            listener.parameter_changed(unique_id, value);
        }
    }
}

impl cp::States for ProcessingStore {
    fn get_by_hash(&self, id_hash: cp::IdHash) -> Option<InternalValue> {
        self.data.get(&id_hash).map(AtomicValue::load)
    }
}

impl cp::States for Snapshot {
    fn get_by_hash(&self, id_hash: cp::IdHash) -> Option<InternalValue> {
        self.values.get(&id_hash).copied()
    }
}

impl ProcessingStore {
    /// The current values as states for one block.
    ///
    /// Every value is loaded once, so every parameter holds still across the
    /// block even if the main thread writes to the store meanwhile. Never
    /// allocates.
    pub fn buffer_states(&mut self) -> ConstantBufferStates<&Snapshot> {
        for (hash, value) in &mut self.snapshot.values {
            if let Some(atomic) = self.data.get(hash) {
                *value = atomic.load();
            }
        }
        ConstantBufferStates::new(&self.snapshot)
    }
}
