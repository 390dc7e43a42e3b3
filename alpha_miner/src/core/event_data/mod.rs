//! Event Data
//!
//! Event logs as sequences of activity labels, plus their import/export
#[doc(hidden)]
pub(crate) mod event_log_struct;
pub mod io;

#[doc(inline)]
pub use event_log_struct::*;
