use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::time::Instant;

use crate::data_models::TransparencyResponse;
use crate::session::{KeywordFilter, SubmitRejected, Submission};
use crate::view::PageView;

use super::SharedState;
use super::models::{ErrorBody, FastModeForm, FilterForm, SearchForm, SearchRequest};
use super::page::render_index;

pub async fn index_handler(
    State(state): State<SharedState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let view = {
        let session = state.session.lock().await;
        PageView::from_session(&session, Instant::now())
    };

    let html = render_index(state.templates(), &view).map_err(|e| {
        tracing::error!("template error: {e:#}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Render error: {}", e),
        )
    })?;
    Ok(Html(html))
}

pub async fn state_handler(State(state): State<SharedState>) -> Json<PageView> {
    let session = state.session.lock().await;
    Json(PageView::from_session(&session, Instant::now()))
}

/// Starts a search and returns straight away; the page polls while loading.
pub async fn submit_handler(
    State(state): State<SharedState>,
    Form(form): Form<SearchForm>,
) -> Response {
    let submission = {
        let mut session = state.session.lock().await;
        session.submit(&form.query)
    };

    match submission {
        Ok(submission) => {
            tracing::info!(id = %submission.id, query = %submission.query, "search submitted");
            tokio::spawn(run_submission(state.clone(), submission));
        }
        Err(SubmitRejected::EmptyQuery) => {}
        Err(SubmitRejected::Busy) => {
            tracing::debug!("submission ignored: search already in progress");
        }
    }
    Redirect::to("/").into_response()
}

/// Runs the backend call without holding the session lock.
pub async fn run_submission(state: SharedState, submission: Submission) {
    let outcome = state
        .orchestrator
        .search(&submission.query, submission.fast_mode)
        .await;

    let mut session = state.session.lock().await;
    let applied = match &outcome {
        Ok(response) => session.complete(&submission, response.clone()),
        Err(e) => session.fail(&submission, e),
    };
    if !applied {
        tracing::warn!(id = %submission.id, "discarding outcome of a superseded search");
    }
}

pub async fn fast_mode_handler(
    State(state): State<SharedState>,
    Form(form): Form<FastModeForm>,
) -> Redirect {
    let enabled = form.is_enabled();
    state.session.lock().await.set_fast_mode(enabled);
    tracing::debug!(enabled, "fast mode set");
    Redirect::to("/")
}

/// Selects one keyword. The value is matched verbatim, so a keyword that
/// happens to read "all" is still just that keyword.
pub async fn filter_handler(
    State(state): State<SharedState>,
    Form(form): Form<FilterForm>,
) -> Redirect {
    apply_filter(&state, KeywordFilter::Keyword(form.keyword)).await;
    Redirect::to("/")
}

pub async fn filter_all_handler(State(state): State<SharedState>) -> Redirect {
    apply_filter(&state, KeywordFilter::All).await;
    Redirect::to("/")
}

async fn apply_filter(state: &SharedState, filter: KeywordFilter) {
    if !state.session.lock().await.select_keyword(filter) {
        tracing::debug!("filter ignored: no results to filter");
    }
}

pub async fn clear_handler(State(state): State<SharedState>) -> Redirect {
    if !state.session.lock().await.clear() {
        tracing::debug!("clear ignored: search in progress");
    }
    Redirect::to("/")
}

/// Stateless JSON endpoint: one orchestrator call per request.
pub async fn search_handler(
    State(state): State<SharedState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<TransparencyResponse>, (StatusCode, Json<ErrorBody>)> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Query cannot be empty".to_string(),
            }),
        ));
    }

    let response = state
        .orchestrator
        .search(query, request.fast_mode)
        .await
        .map_err(|e| {
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: e.user_message().to_string(),
                }),
            )
        })?;

    Ok(Json(response))
}

pub async fn health_handler() -> &'static str {
    "ok"
}
