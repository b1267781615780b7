//! Ordered log of executed transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single executed transition.
///
/// `trigger` is `None` for transitions forced with [`Machine::go_to`].
/// Records serialize when the identifier types do.
///
/// [`Machine::go_to`]: crate::Machine::go_to
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, T> {
    /// State the machine left.
    pub from: S,
    /// State the machine entered.
    pub to: S,
    /// Trigger that caused the transition, if any.
    pub trigger: Option<T>,
    /// When the transition executed.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of a machine's executed transitions.
///
/// The machine appends one record per executed transition; suppressed
/// transitions (rejected triggers, self-loops) leave no trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct History<S, T> {
    records: Vec<TransitionRecord<S, T>>,
}

impl<S, T> Default for History<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> History<S, T> {
    pub fn new() -> Self {
        History {
            records: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, record: TransitionRecord<S, T>) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TransitionRecord<S, T>] {
        &self.records
    }

    /// The most recent record, if any transition has executed.
    pub fn last(&self) -> Option<&TransitionRecord<S, T>> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// States traversed, oldest first: the first record's source followed by
    /// every record's destination. Empty when no transition has executed.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }
}
