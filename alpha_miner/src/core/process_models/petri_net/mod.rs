//! Petri net
#[cfg(feature = "graphviz-export")]
pub mod image_export;
pub(crate) mod petri_net_struct;
pub use petri_net_struct::*;
pub mod io;
pub mod pnml;
