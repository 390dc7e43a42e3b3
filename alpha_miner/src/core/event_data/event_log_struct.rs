use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

///
/// Activity label of an event
///
/// Activities are opaque: two activities are equal iff their whole labels are equal.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Activity(String);

impl Activity {
    /// Create a new [`Activity`] from a label
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self(label.into())
    }

    /// Label of the activity
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Activity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Activity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Activity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

///
/// A single case: the ordered sequence of [`Activity`]s that were executed
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    /// Executed activities (in order)
    pub activities: Vec<Activity>,
}

impl Trace {
    /// First activity of the trace (if any)
    pub fn first(&self) -> Option<&Activity> {
        self.activities.first()
    }

    /// Last activity of the trace (if any)
    pub fn last(&self) -> Option<&Activity> {
        self.activities.last()
    }

    /// Number of activities in the trace
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// `true` if the trace contains no activities
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Iterate over the activities of the trace
    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }

    /// Iterate over all directly-follows pairs `(trace[i], trace[i+1])`
    pub fn df_pairs(&self) -> impl Iterator<Item = (&Activity, &Activity)> + '_ {
        self.activities.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl<A: Into<Activity>> FromIterator<A> for Trace {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        Self {
            activities: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<A: Into<Activity>> From<Vec<A>> for Trace {
    fn from(value: Vec<A>) -> Self {
        value.into_iter().collect()
    }
}

///
/// Event log consisting of [`Trace`]s
///
/// Serialized as an array of traces, each an array of activity labels.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    /// Traces of the log (in recorded order)
    pub traces: Vec<Trace>,
}

impl EventLog {
    /// Create an [`EventLog`] from traces
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    /// Number of traces
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// `true` if the log contains no traces
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Total number of events over all traces
    pub fn num_events(&self) -> usize {
        self.traces.iter().map(Trace::len).sum()
    }
}

impl<T: Into<Trace>> FromIterator<T> for EventLog {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            traces: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Into<Trace>> From<Vec<T>> for EventLog {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}
