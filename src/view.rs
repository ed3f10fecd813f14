//! Render model for the page: everything the template needs, derived from a
//! [`Session`] snapshot.

use std::time::Instant;

use serde::Serialize;

use crate::session::{LoadingStage, SearchState, Session};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    /// Keyword posted back to select this chip; `None` for the aggregate chip.
    pub keyword: Option<String>,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResultCard {
    pub keyword: String,
    pub title: String,
    /// Only set for http(s) urls; other schemes render as plain text.
    pub url: Option<String>,
    pub host: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub phase: &'static str,
    pub fast_mode: bool,
    pub busy: bool,
    pub query: Option<String>,
    pub stage: Option<&'static str>,
    pub stages: Vec<&'static str>,
    pub error: Option<String>,
    pub result_mode_fast: bool,
    pub chips: Vec<Chip>,
    pub keywords: Vec<String>,
    pub answer: Option<String>,
    pub cards: Vec<ResultCard>,
    pub actual_queries: Vec<String>,
    pub copy_all: String,
}

impl PageView {
    pub fn from_session(session: &Session, now: Instant) -> PageView {
        let mut view = PageView {
            phase: session.state().name(),
            fast_mode: session.fast_mode(),
            busy: session.state().is_loading(),
            query: None,
            stage: None,
            stages: Vec::new(),
            error: None,
            result_mode_fast: false,
            chips: Vec::new(),
            keywords: Vec::new(),
            answer: None,
            cards: Vec::new(),
            actual_queries: Vec::new(),
            copy_all: String::new(),
        };

        match session.state() {
            SearchState::Idle => {}
            SearchState::Loading {
                query,
                fast_mode,
                started_at,
                ..
            } => {
                let elapsed = now.saturating_duration_since(*started_at);
                view.query = Some(query.clone());
                view.stage = Some(LoadingStage::at(elapsed, *fast_mode).label());
                view.stages = LoadingStage::sequence(*fast_mode)
                    .iter()
                    .map(|s| s.label())
                    .collect();
            }
            SearchState::Error { query, message } => {
                view.query = Some(query.clone());
                view.error = Some(message.clone());
            }
            SearchState::Ready {
                query,
                response,
                filter,
            } => {
                let results = session.visible_results();
                view.query = Some(query.clone());
                view.result_mode_fast = response.is_fast_mode;
                view.keywords = response.keywords.clone();
                view.answer = response.answer.clone();
                view.actual_queries = response.actual_queries.clone();
                view.copy_all = response.actual_queries.join("\n");

                if !response.is_fast_mode {
                    view.chips.push(Chip {
                        label: "All Results".to_string(),
                        keyword: None,
                        count: response.results.len(),
                        active: filter.selects_all(),
                    });
                    view.chips.extend(response.keywords.iter().map(|k| Chip {
                        label: k.clone(),
                        keyword: Some(k.clone()),
                        count: response.count_for(k),
                        active: filter.selects(k),
                    }));
                }

                view.cards = results
                    .into_iter()
                    .map(|r| ResultCard {
                        keyword: r.keyword.clone(),
                        title: r.title.clone(),
                        url: r.link_url().map(str::to_string),
                        host: r.display_host().unwrap_or_else(|| r.url.clone()),
                        snippet: r.snippet.clone(),
                    })
                    .collect();
            }
        }

        view
    }
}
