//! Ingested interaction events. Raw labels and optional attribution fields are
//! resolved once, when a record enters the engine, into [`EventKind`] and
//! [`Attribution`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One interaction with a campaign's promoted post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    pub attribution: Attribution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Like,
    Dislike,
    LikeReset,
    DislikeReset,
    Comment,
    /// Site identifier exactly as reported, empty when absent.
    Visit { site: String },
    /// Label the classifier does not know. Carried so it can be logged.
    Unclassified(String),
}

/// Who an event's counts flow to inside a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    ByInfluencer { id: u64, username: String },
    ByInterestSet(InterestSet),
    Unattributed,
}

/// Order-independent, deduplicated set of interest names.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestSet(BTreeSet<String>);

impl InterestSet {
    pub fn new<I, S>(interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(interests.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for InterestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", joined.join(", "))
    }
}

impl Event {
    pub fn new(kind: EventKind, timestamp: DateTime<Utc>, attribution: Attribution) -> Self {
        Self {
            kind,
            timestamp,
            attribution,
        }
    }
}
