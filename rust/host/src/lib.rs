//! Runs gainstage effects inside an application.
//!
//! A [`Host`] owns one [`Component`](gainstage_component::Component) and walks its
//! processor through the usual plug-in lifecycle: bus layout negotiation,
//! setup, activation and processing. Parameter values live in a pair of
//! stores shared between the main thread and the audio thread (see
//! [`create_stores`]), so a UI or automation source can write values while
//! audio is running.

pub mod layout;
pub mod parameters;
pub mod processor;
pub mod store;

pub use layout::{BusLayout, LayoutError};
pub use processor::{Host, Info, ProcessError, ProcessSetup, SetupError};
pub use store::{Listener, MainStore, ProcessingStore, SetError, Snapshot, create_stores};
