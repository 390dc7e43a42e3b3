//! Ordering relations between activities, derived from the traces of an [`EventLog`]
use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::event_data::{Activity, EventLog};

use super::error::AlphaMinerError;

/// Set of activities (ordered for deterministic iteration)
pub type ActivitySet = BTreeSet<Activity>;

/// Set of ordered activity pairs `(a, b)`
pub type ActivityPairs = BTreeSet<(Activity, Activity)>;

///
/// Unordered pair of activities `{a, b}`
///
/// Normalized on construction so that `first() <= second()`; `{a, b}` and `{b, a}` are the same value.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnorderedPair(Activity, Activity);

impl UnorderedPair {
    /// Create a new (normalized) unordered pair
    pub fn new(a: Activity, b: Activity) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Smaller activity of the pair
    pub fn first(&self) -> &Activity {
        &self.0
    }

    /// Larger activity of the pair
    pub fn second(&self) -> &Activity {
        &self.1
    }

    /// Check if `act` is one of the two activities
    pub fn contains(&self, act: &Activity) -> bool {
        &self.0 == act || &self.1 == act
    }
}

/// Set of unordered activity pairs
pub type UnorderedPairs = BTreeSet<UnorderedPair>;

/// Relation between two activities according to the footprint of a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootprintRelation {
    /// `a -> b`: `a` is directly followed by `b`, but never the other way around
    Causal,
    /// `b -> a`
    ReverseCausal,
    /// `a || b`: observed in both orders
    Parallel,
    /// `a # b`: never directly following each other
    Choice,
}

///
/// All relations the Alpha algorithm derives from an [`EventLog`]
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRelations {
    /// All activities occurring in the log
    pub activities: ActivitySet,
    /// First activities of all traces
    pub initial_activities: ActivitySet,
    /// Last activities of all traces
    pub final_activities: ActivitySet,
    /// Directly-follows relation
    pub directly_follows: ActivityPairs,
    /// Causal relation (`a -> b`)
    pub causal: ActivityPairs,
    /// Parallel relation (`a || b`)
    pub parallel: UnorderedPairs,
    /// Choice relation (`a # b`), informational only
    pub choice: UnorderedPairs,
}

impl LogRelations {
    /// Relation between `a` and `b` in the footprint of the log
    pub fn footprint(&self, a: &Activity, b: &Activity) -> FootprintRelation {
        footprint_relation(&self.directly_follows, a, b)
    }

    /// Check if `a -> b` holds
    pub fn is_causal(&self, a: &Activity, b: &Activity) -> bool {
        contains_pair(&self.causal, a, b)
    }
}

fn contains_pair(pairs: &ActivityPairs, a: &Activity, b: &Activity) -> bool {
    pairs.contains(&(a.clone(), b.clone()))
}

/// Relation between `a` and `b` given a directly-follows relation
pub fn footprint_relation(df: &ActivityPairs, a: &Activity, b: &Activity) -> FootprintRelation {
    match (contains_pair(df, a, b), contains_pair(df, b, a)) {
        (true, true) => FootprintRelation::Parallel,
        (true, false) => FootprintRelation::Causal,
        (false, true) => FootprintRelation::ReverseCausal,
        (false, false) => FootprintRelation::Choice,
    }
}

/// Reject logs without traces or with empty traces
pub fn validate_log(log: &EventLog) -> Result<(), AlphaMinerError> {
    if log.is_empty() {
        return Err(AlphaMinerError::EmptyLog);
    }
    match log.traces.iter().position(|t| t.is_empty()) {
        Some(index) => Err(AlphaMinerError::DegenerateTrace(index)),
        None => Ok(()),
    }
}

/// All activities occurring in the log
pub fn activities(log: &EventLog) -> ActivitySet {
    log.traces
        .par_iter()
        .flat_map_iter(|t| t.iter().cloned())
        .collect()
}

/// First activity of every trace
pub fn initial_activities(log: &EventLog) -> ActivitySet {
    log.traces
        .par_iter()
        .filter_map(|t| t.first().cloned())
        .collect()
}

/// Last activity of every trace
pub fn final_activities(log: &EventLog) -> ActivitySet {
    log.traces
        .par_iter()
        .filter_map(|t| t.last().cloned())
        .collect()
}

/// Every adjacent pair `(trace[i], trace[i+1])` of every trace
pub fn directly_follows(log: &EventLog) -> ActivityPairs {
    log.traces
        .par_iter()
        .flat_map_iter(|t| t.df_pairs().map(|(a, b)| (a.clone(), b.clone())))
        .collect()
}

/// Pairs `(a, b)` of the directly-follows relation for which `(b, a)` is not contained
pub fn causal(df: &ActivityPairs) -> ActivityPairs {
    df.iter()
        .filter(|(a, b)| !contains_pair(df, b, a))
        .cloned()
        .collect()
}

/// Unordered pairs `{a, b}` for which both `(a, b)` and `(b, a)` are directly-follows pairs
///
/// A self-loop `(a, a)` yields `{a, a}`.
pub fn parallel(df: &ActivityPairs) -> UnorderedPairs {
    df.iter()
        .filter(|(a, b)| contains_pair(df, b, a))
        .map(|(a, b)| UnorderedPair::new(a.clone(), b.clone()))
        .collect()
}

/// Unordered pairs `{a, b}` (including `a == b`) of activities never directly following each other
pub fn choice(activities: &ActivitySet, df: &ActivityPairs) -> UnorderedPairs {
    activities
        .iter()
        .enumerate()
        .flat_map(|(i, a)| activities.iter().skip(i).map(move |b| (a, b)))
        .filter(|(a, b)| footprint_relation(df, a, b) == FootprintRelation::Choice)
        .map(|(a, b)| UnorderedPair::new(a.clone(), b.clone()))
        .collect()
}

///
/// Validate `log` and compute all [`LogRelations`]
///
/// Fails with [`AlphaMinerError::EmptyLog`] if the log has no traces and with
/// [`AlphaMinerError::DegenerateTrace`] if any trace is empty.
///
pub fn extract_relations(log: &EventLog) -> Result<LogRelations, AlphaMinerError> {
    validate_log(log)?;
    let activities = activities(log);
    let directly_follows = directly_follows(log);
    let causal = causal(&directly_follows);
    let parallel = parallel(&directly_follows);
    let choice = choice(&activities, &directly_follows);
    Ok(LogRelations {
        initial_activities: initial_activities(log),
        final_activities: final_activities(log),
        activities,
        directly_follows,
        causal,
        parallel,
        choice,
    })
}
