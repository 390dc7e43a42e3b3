#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]
#![allow(clippy::needless_doctest_main)]
#![doc = include_str!("../README.md")]

///
/// Core data structures: event logs, Petri nets and their import/export
///
pub mod core;

///
/// Process discovery (Alpha algorithm)
///
pub mod discovery;

#[cfg(test)]
mod utils;

#[doc(inline)]
pub use crate::core::{
    io::{Exportable, Importable},
    Activity, EventLog, PetriNet, Trace,
};

#[doc(inline)]
pub use crate::discovery::alpha::{
    full::{alpha_discover_petri_net, discover_alpha_net, AlphaDiscovery, AlphaMinerConfig},
    AlphaMinerError, AlphaNet,
};
