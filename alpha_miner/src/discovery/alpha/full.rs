use std::{
    collections::BTreeSet,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{event_data::EventLog, process_models::petri_net::PetriNet};

use super::{
    candidate_building::{build_candidates, PlaceCandidate},
    candidate_pruning::prune_candidates,
    error::AlphaMinerError,
    net_building::{build_alpha_net, AlphaNet},
    relations::{extract_relations, LogRelations},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Duration (in seconds) per parts of the Alpha algorithm (+ total time)
pub struct AlgoDuration {
    /// Duration for extracting the log relations (in seconds)
    pub extract_relations: f32,
    /// Duration for building place candidates (in seconds)
    pub cnd_building: f32,
    /// Duration for pruning place candidates to maximal ones (in seconds)
    pub prune_cnd: f32,
    /// Duration for constructing Petri net (in seconds)
    pub build_net: f32,
    /// Total duration (in seconds)
    pub total: f32,
}
impl AlgoDuration {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Get current system time milliseconds
pub fn get_current_time_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
/// Algorithm parameters for the Alpha algorithm
pub struct AlphaMinerConfig {
    /// Remove final activities that are the sole producer of a discovered place
    pub clean_end_activities: bool,
    /// Check every maximal place candidate for causal consistency before building the net
    pub check_candidates: bool,
}

impl Default for AlphaMinerConfig {
    fn default() -> Self {
        Self {
            clean_end_activities: true,
            check_candidates: true,
        }
    }
}

impl AlphaMinerConfig {
    /// Serialize Alpha parameters to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
    /// Deserialize Alpha parameters from JSON string
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

///
/// Everything produced by one Alpha discovery run
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphaDiscovery {
    /// Relations extracted from the log
    pub relations: LogRelations,
    /// All place candidates (XL)
    pub candidates: BTreeSet<PlaceCandidate>,
    /// The discovered net (its places correspond to the maximal candidates, YL)
    pub net: AlphaNet,
}

impl AlphaDiscovery {
    /// Maximal place candidates (YL), in place numbering order
    pub fn maximal_candidates(&self) -> impl Iterator<Item = &PlaceCandidate> + '_ {
        self.net.candidate_places().iter().map(|(cnd, _)| cnd)
    }
}

///
/// Discover a [`PetriNet`] using the Alpha algorithm
///
/// Additionally returns the intermediate results and the durations for performance measurements
///
pub fn discover_alpha_net(
    log: &EventLog,
    config: &AlphaMinerConfig,
) -> Result<(AlphaDiscovery, AlgoDuration), AlphaMinerError> {
    discover_alpha_net_with_timing_fn(log, config, &get_current_time_millis)
}

/// Run Alpha discovery
///
/// Measures [`AlgoDuration`] using the passed `get_time_millis_fn` function
pub fn discover_alpha_net_with_timing_fn(
    log: &EventLog,
    config: &AlphaMinerConfig,
    get_time_millis_fn: &dyn Fn() -> u128,
) -> Result<(AlphaDiscovery, AlgoDuration), AlphaMinerError> {
    info!(
        traces = log.len(),
        events = log.num_events(),
        "Started Alpha Discovery"
    );
    let mut algo_dur = AlgoDuration::default();
    let secs_since = |start: u128| get_time_millis_fn().saturating_sub(start) as f32 / 1000.0;
    let total_start = get_time_millis_fn();

    let start = get_time_millis_fn();
    let relations = extract_relations(log)?;
    algo_dur.extract_relations = secs_since(start);
    debug!(
        activities = relations.activities.len(),
        directly_follows = relations.directly_follows.len(),
        causal = relations.causal.len(),
        parallel = relations.parallel.len(),
        "Extracted log relations"
    );

    let start = get_time_millis_fn();
    let candidates = build_candidates(&relations.causal, &relations.parallel);
    algo_dur.cnd_building = secs_since(start);
    debug!(candidates = candidates.len(), "Built place candidates");

    let start = get_time_millis_fn();
    let maximal = prune_candidates(&candidates);
    algo_dur.prune_cnd = secs_since(start);
    debug!(maximal = maximal.len(), "Pruned to maximal place candidates");

    let start = get_time_millis_fn();
    let net = build_alpha_net(&relations, &maximal, config)?;
    algo_dur.build_net = secs_since(start);

    algo_dur.total = secs_since(total_start);
    info!(
        places = net.net().places.len(),
        transitions = net.net().transitions.len(),
        total_secs = algo_dur.total,
        "Finished Alpha Discovery"
    );
    Ok((
        AlphaDiscovery {
            relations,
            candidates,
            net,
        },
        algo_dur,
    ))
}

/// Discover a [`PetriNet`] with the default [`AlphaMinerConfig`]
pub fn alpha_discover_petri_net(log: &EventLog) -> Result<PetriNet, AlphaMinerError> {
    let (discovery, _) = discover_alpha_net(log, &AlphaMinerConfig::default())?;
    Ok(discovery.net.into_petri_net())
}
