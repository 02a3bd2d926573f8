//! Observable widget state

use domain::AddressCandidate;
use serde::Serialize;

/// Indicator shown in place of a candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultNotice {
    /// The provider answered with zero results
    NoResults,
    /// The request or its payload failed
    ConnectivityError,
}

impl ResultNotice {
    /// Text rendered for the notice
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoResults => "No results found",
            Self::ConnectivityError => "Error! No internet connection?",
        }
    }
}

/// Query lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Pending,
    Results,
    Empty,
    Failed,
}

/// Snapshot of the widget state
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryState {
    /// Current input text, untrimmed
    pub input: String,
    /// Trimmed text of the last dispatched query
    pub last_query: String,
    /// A dispatched request has not settled yet
    pub pending: bool,
    /// Rendered candidate list, in provider order
    pub candidates: Vec<AddressCandidate>,
    /// Rendered notice, mutually exclusive with candidates
    pub notice: Option<ResultNotice>,
    /// Glass-button mode only
    pub expanded: bool,
    /// The clear affordance is shown
    pub clear_visible: bool,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl QueryState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.pending {
            return Phase::Pending;
        }
        match self.notice {
            Some(ResultNotice::ConnectivityError) => Phase::Failed,
            Some(ResultNotice::NoResults) => Phase::Empty,
            None if self.candidates.is_empty() => Phase::Idle,
            None => Phase::Results,
        }
    }

    /// Whether a candidate list is currently rendered
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Drop the rendered list and any notice
    pub(crate) fn clear_results(&mut self) {
        self.candidates.clear();
        self.notice = None;
    }

    /// Invalidate every request dispatched so far
    pub(crate) const fn bump_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
