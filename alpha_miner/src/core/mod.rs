//! Core data structures: event logs and Petri nets
pub mod event_data;

/// IO Traits
pub mod io;

/// Process models (Petri nets)
pub mod process_models;

pub use event_data::{Activity, EventLog, Trace};
pub use process_models::petri_net::PetriNet;
