//! Server-side page rendering.

use minijinja::{Environment, context};

use crate::view::PageView;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    Ok(env)
}

pub fn render_index(env: &Environment<'_>, view: &PageView) -> Result<String, minijinja::Error> {
    env.get_template("index.html")?.render(context! { view })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::{SearchResult, TransparencyResponse};
    use crate::session::Session;
    use std::time::Instant;

    #[test]
    fn test_idle_page_has_empty_state() {
        let env = environment().unwrap();
        let view = PageView::from_session(&Session::new(), Instant::now());
        let html = render_index(&env, &view).unwrap();
        assert!(html.contains("id=\"empty-state\""));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_ready_page_escapes_and_links() {
        let env = environment().unwrap();
        let mut session = Session::new();
        let sub = session.submit("q").unwrap();
        session.complete(
            &sub,
            TransparencyResponse {
                keywords: vec!["k".into()],
                results: vec![SearchResult::new(
                    "k",
                    "<script>alert(1)</script>",
                    "https://example.com/a",
                    "snippet",
                )],
                actual_queries: vec!["k query".into()],
                is_fast_mode: false,
                answer: Some("answer".into()),
            },
        );
        let view = PageView::from_session(&session, Instant::now());
        let html = render_index(&env, &view).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("k query"));
    }

    #[test]
    fn test_non_http_urls_render_as_plain_text() {
        let env = environment().unwrap();
        let mut session = Session::new();
        let sub = session.submit("q").unwrap();
        session.complete(
            &sub,
            TransparencyResponse {
                keywords: vec!["k".into()],
                results: vec![
                    SearchResult::new("k", "Cookie thief", "javascript:alert(document.cookie)", ""),
                    SearchResult::new("k", "Inline page", "data:text/html,hi", ""),
                    SearchResult::new("k", "Real page", "https://example.com/real", ""),
                ],
                actual_queries: vec![],
                is_fast_mode: false,
                answer: None,
            },
        );
        let view = PageView::from_session(&session, Instant::now());
        let html = render_index(&env, &view).unwrap();
        assert!(!html.contains("href=\"javascript:"));
        assert!(!html.contains("href=\"data:"));
        assert!(html.contains("<h3>Cookie thief</h3>"));
        assert!(html.contains("<h3>Inline page</h3>"));
        assert!(html.contains("href=\"https://example.com/real\""));
    }

    #[test]
    fn test_all_chip_posts_to_its_own_route() {
        let env = environment().unwrap();
        let mut session = Session::new();
        let sub = session.submit("q").unwrap();
        session.complete(
            &sub,
            TransparencyResponse {
                keywords: vec!["all".into()],
                results: vec![SearchResult::new("all", "A", "https://example.com/a", "")],
                actual_queries: vec![],
                is_fast_mode: false,
                answer: None,
            },
        );
        let view = PageView::from_session(&session, Instant::now());
        let html = render_index(&env, &view).unwrap();
        assert!(html.contains("action=\"/filter/all\""));
        assert!(html.contains("name=\"keyword\" value=\"all\""));
    }

    #[test]
    fn test_loading_page_refreshes_and_disables_submit() {
        let env = environment().unwrap();
        let mut session = Session::new();
        session.submit("q").unwrap();
        let view = PageView::from_session(&session, Instant::now());
        let html = render_index(&env, &view).unwrap();
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("disabled"));
    }
}
