use super::candidate_building::PlaceCandidate;

/// Errors aborting an Alpha discovery run
///
/// No partial net is returned when any of these occur.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphaMinerError {
    /// The event log contains no traces
    #[error("Event log contains no traces")]
    EmptyLog,
    /// The trace at the given index contains no activities
    #[error("Trace #{0} contains no activities")]
    DegenerateTrace(usize),
    /// A maximal place candidate violates the causal/non-causal structure it should have
    #[error("Inconsistent place candidate {candidate}: {reason}")]
    InconsistentCandidate {
        /// The offending candidate
        candidate: PlaceCandidate,
        /// Which part of the invariant is violated
        reason: String,
    },
}
