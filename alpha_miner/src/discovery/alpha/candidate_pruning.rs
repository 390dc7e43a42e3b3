use std::collections::BTreeSet;

use rayon::prelude::*;

use super::candidate_building::PlaceCandidate;

///
/// Reduce place candidates (XL) to their maximal elements (YL)
///
/// A candidate is dropped if another candidate dominates it (see [`PlaceCandidate::is_dominated_by`]).
/// Domination is always checked against the full candidate set, so the result does not depend on evaluation order.
/// The result is sorted.
///
pub fn prune_candidates(cnds: &BTreeSet<PlaceCandidate>) -> Vec<PlaceCandidate> {
    let maximal: BTreeSet<PlaceCandidate> = cnds
        .par_iter()
        .filter(|cnd| !cnds.iter().any(|other| cnd.is_dominated_by(other)))
        .cloned()
        .collect();
    maximal.into_iter().collect()
}
