//! Search state machine behind the page.
//!
//! `Idle -> Loading -> (Ready | Error) -> Idle`. The result object is
//! replaced wholesale on every transition, never edited in place.

use std::time::{Duration, Instant};

use nanoid::nanoid;

use crate::data_models::{SearchResult, TransparencyResponse};
use crate::error::SearchError;

/// How long each decorative loading stage is shown.
pub const STAGE_INTERVAL: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeywordFilter {
    #[default]
    Unset,
    All,
    Keyword(String),
}

impl KeywordFilter {
    pub fn apply<'a>(&self, results: &'a [SearchResult]) -> Vec<&'a SearchResult> {
        match self {
            KeywordFilter::Unset | KeywordFilter::All => results.iter().collect(),
            KeywordFilter::Keyword(k) => results.iter().filter(|r| r.keyword == *k).collect(),
        }
    }

    pub fn selects(&self, keyword: &str) -> bool {
        matches!(self, KeywordFilter::Keyword(k) if k == keyword)
    }

    pub fn selects_all(&self) -> bool {
        matches!(self, KeywordFilter::All | KeywordFilter::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    AnalyzingIntent,
    GeneratingStrategy,
    SearchingWeb,
}

impl LoadingStage {
    pub fn sequence(fast_mode: bool) -> &'static [LoadingStage] {
        if fast_mode {
            &[LoadingStage::AnalyzingIntent, LoadingStage::GeneratingStrategy]
        } else {
            &[
                LoadingStage::AnalyzingIntent,
                LoadingStage::GeneratingStrategy,
                LoadingStage::SearchingWeb,
            ]
        }
    }

    /// Stage to show after `elapsed`; holds on the last one. Not tied to
    /// backend progress.
    pub fn at(elapsed: Duration, fast_mode: bool) -> LoadingStage {
        let stages = Self::sequence(fast_mode);
        let idx = (elapsed.as_millis() / STAGE_INTERVAL.as_millis()) as usize;
        stages[idx.min(stages.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadingStage::AnalyzingIntent => "Analyzing search intent...",
            LoadingStage::GeneratingStrategy => "Generating search strategy...",
            LoadingStage::SearchingWeb => "Searching the web...",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SearchState {
    Idle,
    Loading {
        id: String,
        query: String,
        fast_mode: bool,
        started_at: Instant,
    },
    Ready {
        query: String,
        response: TransparencyResponse,
        filter: KeywordFilter,
    },
    Error {
        query: String,
        message: String,
    },
}

impl SearchState {
    pub fn name(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading { .. } => "loading",
            SearchState::Ready { .. } => "ready",
            SearchState::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    pub fn response(&self) -> Option<&TransparencyResponse> {
        match self {
            SearchState::Ready { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Ticket handed out by [`Session::submit`]. Captures the mode at submission
/// time so later toggles only affect the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub query: String,
    pub fast_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("query is empty")]
    EmptyQuery,
    #[error("a search is already in progress")]
    Busy,
}

#[derive(Debug, Clone)]
pub struct Session {
    fast_mode: bool,
    state: SearchState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            fast_mode: false,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn set_fast_mode(&mut self, enabled: bool) {
        self.fast_mode = enabled;
    }

    pub fn submit(&mut self, query: &str) -> Result<Submission, SubmitRejected> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SubmitRejected::EmptyQuery);
        }
        if self.state.is_loading() {
            return Err(SubmitRejected::Busy);
        }

        let submission = Submission {
            id: nanoid!(),
            query: query.to_string(),
            fast_mode: self.fast_mode,
        };
        self.state = SearchState::Loading {
            id: submission.id.clone(),
            query: submission.query.clone(),
            fast_mode: submission.fast_mode,
            started_at: Instant::now(),
        };
        Ok(submission)
    }

    /// Returns false (and changes nothing) if `submission` is not the search
    /// currently in flight.
    pub fn complete(&mut self, submission: &Submission, response: TransparencyResponse) -> bool {
        if !self.is_current(submission) {
            return false;
        }
        self.state = SearchState::Ready {
            query: submission.query.clone(),
            response,
            filter: KeywordFilter::Unset,
        };
        true
    }

    pub fn fail(&mut self, submission: &Submission, error: &SearchError) -> bool {
        if !self.is_current(submission) {
            return false;
        }
        tracing::debug!(id = %submission.id, kind = ?error.kind(), "search moved to error state");
        self.state = SearchState::Error {
            query: submission.query.clone(),
            message: error.user_message().to_string(),
        };
        true
    }

    /// Client-side projection only; returns false outside `Ready`.
    pub fn select_keyword(&mut self, new_filter: KeywordFilter) -> bool {
        match &mut self.state {
            SearchState::Ready { filter, .. } => {
                *filter = new_filter;
                true
            }
            _ => false,
        }
    }

    /// Back to `Idle`. Refused while a search is in flight.
    pub fn clear(&mut self) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state = SearchState::Idle;
        true
    }

    pub fn visible_results(&self) -> Vec<&SearchResult> {
        match &self.state {
            SearchState::Ready {
                response, filter, ..
            } => filter.apply(&response.results),
            _ => Vec::new(),
        }
    }

    fn is_current(&self, submission: &Submission) -> bool {
        matches!(&self.state, SearchState::Loading { id, .. } if *id == submission.id)
    }
}
