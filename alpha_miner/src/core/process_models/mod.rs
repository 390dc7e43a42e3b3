//! Process Models
pub mod petri_net;
