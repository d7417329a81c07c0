mod constant_buffer_states;
mod per_sample;
mod pzip;
mod states_map;


pub use constant_buffer_states::*;
pub use per_sample::*;
pub use states_map::*;
