use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{
    event_data::Activity,
    process_models::petri_net::{ArcType, Marking, PetriNet, PlaceID, TransitionID},
};

use super::{
    candidate_building::{check_candidate, PlaceCandidate},
    error::AlphaMinerError,
    full::AlphaMinerConfig,
    relations::{ActivitySet, LogRelations},
};

/// Label of the place holding the initial token
pub const START_PLACE_LABEL: &str = "Start";
/// Label of the place marked in the final marking
pub const END_PLACE_LABEL: &str = "End";

const ALPHA_NET_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c2e_9b4d_4e8a_a5c7_1d2e_3f4a_5b6c);

/// Name-based node ID, so that mining the same log twice yields identical nets
fn node_uuid(kind: &str, key: &str) -> Uuid {
    Uuid::new_v5(&ALPHA_NET_NAMESPACE, format!("{kind}:{key}").as_bytes())
}

///
/// Petri net discovered by the Alpha algorithm
///
/// Besides the [`PetriNet`] itself, this keeps track of which node belongs to which
/// activity or maximal place candidate. Read-only once built.
///
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlphaNet {
    net: PetriNet,
    start_place: PlaceID,
    end_place: PlaceID,
    transitions: BTreeMap<Activity, TransitionID>,
    candidate_places: Vec<(PlaceCandidate, PlaceID)>,
    final_activities: ActivitySet,
}

impl AlphaNet {
    /// The discovered [`PetriNet`]
    pub fn net(&self) -> &PetriNet {
        &self.net
    }

    /// Take ownership of the discovered [`PetriNet`]
    pub fn into_petri_net(self) -> PetriNet {
        self.net
    }

    /// Place with the initial token
    pub fn start_place(&self) -> PlaceID {
        self.start_place
    }

    /// Place marked in the final marking
    pub fn end_place(&self) -> PlaceID {
        self.end_place
    }

    /// Transition of an activity
    pub fn transition_of(&self, activity: &str) -> Option<TransitionID> {
        self.transitions.get(activity).copied()
    }

    /// All maximal place candidates with their places (in place numbering order)
    pub fn candidate_places(&self) -> &[(PlaceCandidate, PlaceID)] {
        &self.candidate_places
    }

    /// Place created for a maximal place candidate
    pub fn place_of(&self, cnd: &PlaceCandidate) -> Option<PlaceID> {
        self.candidate_places
            .iter()
            .find(|(c, _)| c == cnd)
            .map(|(_, p)| *p)
    }

    /// Final activities connected to the end place (after cleanup)
    pub fn final_activities(&self) -> &ActivitySet {
        &self.final_activities
    }
}

///
/// Remove final activities which are the sole producer of a maximal place
///
/// Such activities have an outgoing place and thus are no true sinks.
///
pub fn clean_final_activities(
    final_activities: &ActivitySet,
    maximal: &[PlaceCandidate],
) -> ActivitySet {
    let producers: ActivitySet = maximal
        .iter()
        .filter_map(PlaceCandidate::sole_producer)
        .cloned()
        .collect();
    final_activities.difference(&producers).cloned().collect()
}

///
/// Build the Alpha [`PetriNet`] from the log relations and the maximal place candidates (YL)
///
/// - one transition per activity
/// - one place per maximal candidate (labeled `1..n` in the given order)
/// - a `Start` place (initially marked) feeding all initial activities
/// - an `End` place (final marking) fed by all final activities
///
pub fn build_alpha_net(
    relations: &LogRelations,
    maximal: &[PlaceCandidate],
    config: &AlphaMinerConfig,
) -> Result<AlphaNet, AlphaMinerError> {
    if config.check_candidates {
        for cnd in maximal {
            check_candidate(&relations.causal, cnd)?;
        }
    }

    let final_activities = if config.clean_end_activities {
        let cleaned = clean_final_activities(&relations.final_activities, maximal);
        for removed in relations.final_activities.difference(&cleaned) {
            warn!(activity = %removed, "Removed final activity which produces into a place");
        }
        cleaned
    } else {
        relations.final_activities.clone()
    };

    let mut net = PetriNet::new();
    let transitions: BTreeMap<Activity, TransitionID> = relations
        .activities
        .iter()
        .map(|act| {
            let t = net.add_transition(
                Some(act.to_string()),
                Some(node_uuid("transition", act.as_str())),
            );
            (act.clone(), t)
        })
        .collect();

    let start_place = net.add_place(
        Some(START_PLACE_LABEL.to_string()),
        Some(node_uuid("place", START_PLACE_LABEL)),
    );
    for t in relations
        .initial_activities
        .iter()
        .filter_map(|act| transitions.get(act))
    {
        net.add_arc(ArcType::place_to_transition(start_place, *t), None);
    }

    let end_place = net.add_place(
        Some(END_PLACE_LABEL.to_string()),
        Some(node_uuid("place", END_PLACE_LABEL)),
    );
    for t in final_activities.iter().filter_map(|act| transitions.get(act)) {
        net.add_arc(ArcType::transition_to_place(*t, end_place), None);
    }

    let candidate_places: Vec<(PlaceCandidate, PlaceID)> = maximal
        .iter()
        .enumerate()
        .map(|(i, cnd)| {
            let label = (i + 1).to_string();
            let place_id = net.add_place(Some(label.clone()), Some(node_uuid("place", &label)));
            for t in cnd.input.iter().filter_map(|act| transitions.get(act)) {
                net.add_arc(ArcType::transition_to_place(*t, place_id), None);
            }
            for t in cnd.output.iter().filter_map(|act| transitions.get(act)) {
                net.add_arc(ArcType::place_to_transition(place_id, *t), None);
            }
            (cnd.clone(), place_id)
        })
        .collect();

    net.initial_marking = Some(Marking::from([(start_place, 1)]));
    net.final_markings = Some(vec![Marking::from([(end_place, 1)])]);
    debug!(
        places = net.places.len(),
        transitions = net.transitions.len(),
        arcs = net.arcs.len(),
        "Built Alpha net"
    );

    Ok(AlphaNet {
        net,
        start_place,
        end_place,
        transitions,
        candidate_places,
        final_activities,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::core::event_data::EventLog;
    use crate::discovery::alpha::{
        candidate_building::build_candidates, candidate_pruning::prune_candidates,
        relations::extract_relations,
    };

    use super::*;

    fn act(a: &str) -> Activity {
        Activity::from(a)
    }

    fn build(log: Vec<Vec<&str>>, config: &AlphaMinerConfig) -> (LogRelations, AlphaNet) {
        let log: EventLog = log.into();
        let relations = extract_relations(&log).unwrap();
        let cnds = build_candidates(&relations.causal, &relations.parallel);
        let maximal = prune_candidates(&cnds);
        let net = build_alpha_net(&relations, &maximal, config).unwrap();
        (relations, net)
    }

    #[test]
    fn sequence_of_two() {
        let (_, alpha_net) = build(vec![vec!["x", "y"]], &AlphaMinerConfig::default());
        let pn = alpha_net.net();
        assert_eq!(pn.places.len(), 3);
        assert_eq!(pn.transitions.len(), 2);
        let x = alpha_net.transition_of("x").unwrap();
        let y = alpha_net.transition_of("y").unwrap();
        assert_eq!(pn.postset_of_place(alpha_net.start_place()), vec![x]);
        assert_eq!(pn.preset_of_place(alpha_net.end_place()), vec![y]);
        let (cnd, place) = &alpha_net.candidate_places()[0];
        assert_eq!(cnd, &PlaceCandidate::new([act("x")], [act("y")]));
        assert_eq!(pn.preset_of_place(*place), vec![x]);
        assert_eq!(pn.postset_of_place(*place), vec![y]);
        assert_eq!(pn.initial_tokens(&alpha_net.start_place()), 1);
        assert_eq!(pn.initial_tokens(place), 0);
        assert_eq!(pn.initial_tokens(&alpha_net.end_place()), 0);
        assert!(pn.is_in_a_final_marking(&alpha_net.end_place()));
    }

    #[test]
    fn final_activity_producing_into_place_is_removed() {
        let (relations, alpha_net) = build(
            vec![vec!["a", "c"], vec!["a", "c", "d"]],
            &AlphaMinerConfig::default(),
        );
        assert_eq!(
            relations.final_activities,
            ActivitySet::from([act("c"), act("d")])
        );
        assert_eq!(alpha_net.final_activities(), &ActivitySet::from([act("d")]));
        let d = alpha_net.transition_of("d").unwrap();
        assert_eq!(alpha_net.net().preset_of_place(alpha_net.end_place()), vec![d]);
    }

    #[test]
    fn cleanup_can_be_disabled() {
        let config = AlphaMinerConfig {
            clean_end_activities: false,
            ..AlphaMinerConfig::default()
        };
        let (_, alpha_net) = build(vec![vec!["a", "c"], vec!["a", "c", "d"]], &config);
        assert_eq!(alpha_net.final_activities().len(), 2);
        assert_eq!(
            alpha_net
                .net()
                .preset_of_place(alpha_net.end_place())
                .len(),
            2
        );
    }

    #[test]
    fn cleanup_is_idempotent() {
        let maximal = vec![
            PlaceCandidate::new([act("c")], [act("d")]),
            PlaceCandidate::new([act("a"), act("b")], [act("e")]),
        ];
        let finals = ActivitySet::from([act("a"), act("c"), act("d")]);
        let once = clean_final_activities(&finals, &maximal);
        assert_eq!(once, ActivitySet::from([act("a"), act("d")]));
        assert_eq!(clean_final_activities(&once, &maximal), once);
    }

    #[test]
    fn inconsistent_candidate_is_rejected() {
        let log: EventLog = vec![vec!["a", "b"]].into();
        let relations = extract_relations(&log).unwrap();
        let bogus = vec![PlaceCandidate::new([act("b")], [act("a")])];
        let res = build_alpha_net(&relations, &bogus, &AlphaMinerConfig::default());
        assert!(matches!(
            res,
            Err(AlphaMinerError::InconsistentCandidate { .. })
        ));
    }

    #[test]
    fn node_ids_are_deterministic() {
        let log = vec![vec!["a", "b", "c"], vec!["a", "c", "b"]];
        let (_, first) = build(log.clone(), &AlphaMinerConfig::default());
        let (_, second) = build(log, &AlphaMinerConfig::default());
        assert_eq!(first.net(), second.net());
        let place_ids: HashSet<PlaceID> = first
            .net()
            .places
            .values()
            .map(PlaceID::from)
            .collect();
        assert_eq!(place_ids.len(), first.candidate_places().len() + 2);
    }
}
