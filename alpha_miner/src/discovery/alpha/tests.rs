use std::collections::{BTreeSet, HashSet};

use proptest::arbitrary::Arbitrary;
use proptest::collection::vec;
use proptest::sample::select;
use proptest::strategy::{BoxedStrategy, Strategy};
use proptest_attr_macro::proptest;

use crate::core::{
    event_data::{Activity, EventLog},
    io::Importable,
};
use crate::utils::test_utils::get_test_data_path;

use super::{
    candidate_building::PlaceCandidate,
    full::{discover_alpha_net, AlphaDiscovery, AlphaMinerConfig},
    net_building::clean_final_activities,
    relations::{ActivityPairs, ActivitySet, UnorderedPair},
    AlphaMinerError,
};

fn act(a: &str) -> Activity {
    Activity::from(a)
}

fn cnd(input: &[&str], output: &[&str]) -> PlaceCandidate {
    PlaceCandidate::new(input.iter().map(|a| act(a)), output.iter().map(|a| act(a)))
}

fn discover(log: &EventLog) -> AlphaDiscovery {
    discover_alpha_net(log, &AlphaMinerConfig::default()).unwrap().0
}

#[test]
fn concurrent_pair_after_common_cause() {
    let log: EventLog = vec![vec!["a", "b", "c"], vec!["a", "c", "b"]].into();
    let discovery = discover(&log);
    let rel = &discovery.relations;
    assert_eq!(
        rel.parallel,
        BTreeSet::from([UnorderedPair::new(act("b"), act("c"))])
    );
    assert_eq!(
        rel.causal,
        ActivityPairs::from([(act("a"), act("b")), (act("a"), act("c"))])
    );
    assert_eq!(rel.initial_activities, ActivitySet::from([act("a")]));
    assert_eq!(rel.final_activities, ActivitySet::from([act("b"), act("c")]));
    assert_eq!(
        discovery.maximal_candidates().cloned().collect::<Vec<_>>(),
        vec![cnd(&["a"], &["b", "c"])]
    );
    // One AND-split place plus Start and End
    assert_eq!(discovery.net.net().places.len(), 3);
}

#[test]
fn strict_sequence() {
    let log: EventLog = vec![vec!["x", "y"]].into();
    let discovery = discover(&log);
    assert!(discovery.relations.parallel.is_empty());
    assert_eq!(
        discovery.maximal_candidates().cloned().collect::<Vec<_>>(),
        vec![cnd(&["x"], &["y"])]
    );
    let alpha_net = &discovery.net;
    let pn = alpha_net.net();
    let x = alpha_net.transition_of("x").unwrap();
    let y = alpha_net.transition_of("y").unwrap();
    assert_eq!(pn.postset_of_place(alpha_net.start_place()), vec![x]);
    assert_eq!(pn.preset_of_place(alpha_net.end_place()), vec![y]);
    assert_eq!(pn.arcs.len(), 4);
}

#[test]
fn empty_log_is_rejected() {
    let res = discover_alpha_net(&EventLog::default(), &AlphaMinerConfig::default());
    assert!(matches!(res, Err(AlphaMinerError::EmptyLog)));
}

#[test]
fn final_activity_feeding_a_place_loses_end_arc() {
    let log: EventLog = vec![vec!["a", "b"], vec!["a", "c"], vec!["a", "c", "d"]].into();
    let discovery = discover(&log);
    assert!(discovery
        .relations
        .final_activities
        .contains(&act("c")));
    assert!(discovery.net.place_of(&cnd(&["c"], &["d"])).is_some());
    assert_eq!(
        discovery.net.final_activities(),
        &ActivitySet::from([act("b"), act("d")])
    );
    let pn = discovery.net.net();
    let c = discovery.net.transition_of("c").unwrap();
    assert!(!pn
        .preset_of_place(discovery.net.end_place())
        .contains(&c));
}

#[test]
fn csv_test_log() {
    let log = EventLog::import_from_path(get_test_data_path().join("event_log.csv")).unwrap();
    let discovery = discover(&log);
    assert_eq!(discovery.relations.activities.len(), 5);
    assert_eq!(
        discovery.maximal_candidates().cloned().collect::<Vec<_>>(),
        vec![
            cnd(&["a"], &["b", "c"]),
            cnd(&["a"], &["e"]),
            cnd(&["b", "c"], &["d"]),
            cnd(&["e"], &["d"]),
        ]
    );
    assert_eq!(discovery.candidates.len(), 8);
    assert_eq!(
        discovery.net.final_activities(),
        &ActivitySet::from([act("d")])
    );
    let pn = discovery.net.net();
    assert_eq!(pn.places.len(), 6);
    assert_eq!(pn.transitions.len(), 5);
    assert!(!pn.contains_duplicate_or_silent_transitions());
}

#[test]
fn json_and_csv_logs_agree() {
    let from_csv = EventLog::import_from_path(get_test_data_path().join("event_log.csv")).unwrap();
    let from_json =
        EventLog::import_from_path(get_test_data_path().join("event_log.json")).unwrap();
    assert_eq!(discover(&from_csv).net.net(), discover(&from_json).net.net());
}

/// Small random log over five activities
#[derive(Debug, Clone)]
struct SmallLog(EventLog);

impl Arbitrary for SmallLog {
    type Parameters = ();
    type Strategy = BoxedStrategy<SmallLog>;

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        let trace = vec(select(vec!["a", "b", "c", "d", "e"]), 1..7);
        vec(trace, 1..7)
            .prop_map(|traces| SmallLog(EventLog::from(traces)))
            .boxed()
    }
}

#[proptest]
fn causal_and_parallel_are_consistent(log: SmallLog) {
    let rel = discover(&log.0).relations;
    for (a, b) in &rel.causal {
        assert_ne!(a, b);
        assert!(!rel.causal.contains(&(b.clone(), a.clone())));
        assert!(!rel.parallel.contains(&UnorderedPair::new(a.clone(), b.clone())));
    }
    for pq in &rel.parallel {
        assert!(rel
            .directly_follows
            .contains(&(pq.first().clone(), pq.second().clone())));
        assert!(rel
            .directly_follows
            .contains(&(pq.second().clone(), pq.first().clone())));
    }
}

#[proptest]
fn maximal_candidates_cover_all_candidates(log: SmallLog) {
    let discovery = discover(&log.0);
    let maximal: Vec<&PlaceCandidate> = discovery.maximal_candidates().collect();
    let unique: HashSet<&PlaceCandidate> = maximal.iter().copied().collect();
    assert_eq!(unique.len(), maximal.len());
    for y in &maximal {
        assert!(discovery.candidates.contains(*y));
        assert!(!discovery.candidates.iter().any(|other| y.is_dominated_by(other)));
    }
    for x in &discovery.candidates {
        assert!(maximal.iter().any(|y| x == *y || x.is_dominated_by(y)));
    }
}

#[proptest]
fn transitions_match_activities(log: SmallLog) {
    let discovery = discover(&log.0);
    let labels: BTreeSet<Activity> = discovery
        .net
        .net()
        .transitions
        .values()
        .filter_map(|t| t.label.as_deref().map(Activity::from))
        .collect();
    assert_eq!(labels.len(), discovery.net.net().transitions.len());
    assert_eq!(labels, discovery.relations.activities);
}

#[proptest]
fn one_place_per_maximal_candidate(log: SmallLog) {
    let discovery = discover(&log.0);
    let alpha_net = &discovery.net;
    let pn = alpha_net.net();
    assert_eq!(pn.places.len(), alpha_net.candidate_places().len() + 2);
    for (cnd, place) in alpha_net.candidate_places() {
        let preset: ActivitySet = pn
            .preset_of_place(*place)
            .into_iter()
            .filter_map(|t| pn.transition_label(t).map(Activity::from))
            .collect();
        let postset: ActivitySet = pn
            .postset_of_place(*place)
            .into_iter()
            .filter_map(|t| pn.transition_label(t).map(Activity::from))
            .collect();
        assert_eq!(preset, cnd.input);
        assert_eq!(postset, cnd.output);
    }
}

#[proptest]
fn final_cleanup_is_idempotent(log: SmallLog) {
    let discovery = discover(&log.0);
    let maximal: Vec<PlaceCandidate> = discovery.maximal_candidates().cloned().collect();
    let once = clean_final_activities(&discovery.relations.final_activities, &maximal);
    assert_eq!(clean_final_activities(&once, &maximal), once);
    assert_eq!(discovery.net.final_activities(), &once);
}
