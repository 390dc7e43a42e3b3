use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::event_data::Activity;

use super::{
    error::AlphaMinerError,
    relations::{ActivityPairs, ActivitySet, UnorderedPairs},
};

///
/// Place candidate `(A, B)`: a place fed by all activities in `A` and consumed by all activities in `B`
///
/// Both sides are typed activity sets; subset tests compare whole activities.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Producing activities
    pub input: ActivitySet,
    /// Consuming activities
    pub output: ActivitySet,
}

impl PlaceCandidate {
    /// Create a new [`PlaceCandidate`] from both sides
    pub fn new<I, O>(input: I, output: O) -> Self
    where
        I: IntoIterator<Item = Activity>,
        O: IntoIterator<Item = Activity>,
    {
        Self {
            input: input.into_iter().collect(),
            output: output.into_iter().collect(),
        }
    }

    /// Check if `other` dominates this candidate, i.e., both sides are subsets of `other`'s sides and both candidates differ
    pub fn is_dominated_by(&self, other: &PlaceCandidate) -> bool {
        self != other && self.input.is_subset(&other.input) && self.output.is_subset(&other.output)
    }

    /// The producing activity if the input side is a singleton
    pub fn sole_producer(&self) -> Option<&Activity> {
        match self.input.len() {
            1 => self.input.first(),
            _ => None,
        }
    }
}

impl Display for PlaceCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({{{}}} => {{{}}})",
            self.input.iter().join(", "),
            self.output.iter().join(", ")
        )
    }
}

fn is_causal(causal: &ActivityPairs, a: &Activity, b: &Activity) -> bool {
    causal.contains(&(a.clone(), b.clone()))
}

///
/// Build the set of place candidates (XL)
///
/// Every causal pair `a -> b` yields `({a}, {b})`. Additionally, for every parallel pair `{p, q}`
/// and causal pair `a -> b`:
/// - `({a}, {p, q})` if `a -> p` and `a -> q`
/// - `({p, q}, {b})` if `p -> b` and `q -> b`
///
/// Sides grow to at most one parallel pair; splits/joins over three or more concurrent
/// activities are not discovered.
///
pub fn build_candidates(
    causal: &ActivityPairs,
    parallel: &UnorderedPairs,
) -> BTreeSet<PlaceCandidate> {
    let mut cnds: BTreeSet<PlaceCandidate> = causal
        .iter()
        .map(|(a, b)| PlaceCandidate::new([a.clone()], [b.clone()]))
        .collect();

    let expanded: Vec<PlaceCandidate> = parallel
        .par_iter()
        .flat_map_iter(|pq| {
            let (p, q) = (pq.first(), pq.second());
            causal.iter().flat_map(move |(a, b)| {
                let split = (is_causal(causal, a, p) && is_causal(causal, a, q))
                    .then(|| PlaceCandidate::new([a.clone()], [p.clone(), q.clone()]));
                let join = (is_causal(causal, p, b) && is_causal(causal, q, b))
                    .then(|| PlaceCandidate::new([p.clone(), q.clone()], [b.clone()]));
                split.into_iter().chain(join)
            })
        })
        .collect();
    cnds.extend(expanded);
    cnds
}

///
/// Verify that `cnd` has the structure of an Alpha place:
/// all `a` in `A` and `b` in `B` are causally related (`a -> b`),
/// and neither side contains two causally related activities
///
pub fn check_candidate(
    causal: &ActivityPairs,
    cnd: &PlaceCandidate,
) -> Result<(), AlphaMinerError> {
    let inconsistent = |reason: String| AlphaMinerError::InconsistentCandidate {
        candidate: cnd.clone(),
        reason,
    };
    if cnd.input.is_empty() || cnd.output.is_empty() {
        return Err(inconsistent("empty side".to_string()));
    }
    if let Some((a, b)) = cnd
        .input
        .iter()
        .cartesian_product(cnd.output.iter())
        .find(|(a, b)| !is_causal(causal, a, b))
    {
        return Err(inconsistent(format!("{a} -> {b} does not hold")));
    }
    for side in [&cnd.input, &cnd.output] {
        if let Some((a, b)) = side
            .iter()
            .tuple_combinations()
            .find(|(a, b)| is_causal(causal, a, b) || is_causal(causal, b, a))
        {
            return Err(inconsistent(format!("{a} and {b} are causally related")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::discovery::alpha::relations::UnorderedPair;

    use super::*;

    fn act(a: &str) -> Activity {
        Activity::from(a)
    }

    fn cnd(input: &[&str], output: &[&str]) -> PlaceCandidate {
        PlaceCandidate::new(input.iter().map(|a| act(a)), output.iter().map(|a| act(a)))
    }

    fn causal(pairs: &[(&str, &str)]) -> ActivityPairs {
        pairs.iter().map(|(a, b)| (act(a), act(b))).collect()
    }

    #[test]
    fn split_and_join_candidates() {
        // a -> {b || c} -> d
        let causal = causal(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let parallel = UnorderedPairs::from([UnorderedPair::new(act("b"), act("c"))]);
        let cnds = build_candidates(&causal, &parallel);
        let expected = BTreeSet::from([
            cnd(&["a"], &["b"]),
            cnd(&["a"], &["c"]),
            cnd(&["b"], &["d"]),
            cnd(&["c"], &["d"]),
            cnd(&["a"], &["b", "c"]),
            cnd(&["b", "c"], &["d"]),
        ]);
        assert_eq!(cnds, expected);
        for c in &cnds {
            check_candidate(&causal, c).unwrap();
        }
    }

    #[test]
    fn parallel_pair_without_common_cause() {
        let causal = causal(&[("a", "b"), ("x", "c")]);
        let parallel = UnorderedPairs::from([UnorderedPair::new(act("b"), act("c"))]);
        let cnds = build_candidates(&causal, &parallel);
        assert_eq!(cnds.len(), 2);
    }

    #[test]
    fn domination() {
        let small = cnd(&["a"], &["b"]);
        let big = cnd(&["a"], &["b", "c"]);
        assert!(small.is_dominated_by(&big));
        assert!(!big.is_dominated_by(&small));
        assert!(!small.is_dominated_by(&small.clone()));
        // Labels sharing characters must not be confused
        let ab = cnd(&["ab"], &["c"]);
        let a_b = cnd(&["a", "b"], &["c"]);
        assert!(!ab.is_dominated_by(&a_b));
        assert!(!a_b.is_dominated_by(&ab));
    }

    #[test]
    fn sole_producer_and_display() {
        let c = cnd(&["a"], &["c", "b"]);
        assert_eq!(c.sole_producer(), Some(&act("a")));
        assert_eq!(c.to_string(), "({a} => {b, c})");
        assert_eq!(cnd(&["a", "b"], &["c"]).sole_producer(), None);
    }

    #[test]
    fn inconsistent_candidates() {
        let causal = causal(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert!(matches!(
            check_candidate(&causal, &cnd(&["b"], &["a"])),
            Err(AlphaMinerError::InconsistentCandidate { .. })
        ));
        let err = check_candidate(&causal, &cnd(&["a"], &["b", "c"])).unwrap_err();
        assert_eq!(
            err,
            AlphaMinerError::InconsistentCandidate {
                candidate: cnd(&["a"], &["b", "c"]),
                reason: "b and c are causally related".to_string(),
            }
        );
        assert!(check_candidate(&causal, &cnd(&[], &["b"])).is_err());
    }
}
