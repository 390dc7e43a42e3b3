//! Alpha Process Discovery Algorithm
//!
//! Relations between activities are extracted from the log ([`relations`]),
//! expanded into place candidates ([`candidate_building`]), reduced to maximal
//! candidates ([`candidate_pruning`]) and finally turned into a Petri net ([`net_building`]).
/// Alpha Place Candidate Building
pub mod candidate_building;
/// Alpha Place Candidate Pruning
pub mod candidate_pruning;
/// Errors of the Alpha algorithm
pub mod error;
/// Full Alpha Discovery algorithm
pub mod full;
/// Construction of the Petri net from maximal place candidates
pub mod net_building;
pub mod relations;
#[cfg(test)]
mod tests;

#[doc(inline)]
pub use error::AlphaMinerError;
#[doc(inline)]
pub use full::{discover_alpha_net, AlphaDiscovery, AlphaMinerConfig};
#[doc(inline)]
pub use net_building::AlphaNet;
