use serde::{Deserialize, Serialize};

/// One retrieved source, tagged with the sub-query it answers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub keyword: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchResult {
    pub fn new(keyword: &str, title: &str, url: &str, snippet: &str) -> SearchResult {
        SearchResult {
            keyword: keyword.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }

    /// The url, if it is safe to emit as a link (http or https only).
    pub fn link_url(&self) -> Option<&str> {
        let url = reqwest::Url::parse(&self.url).ok()?;
        matches!(url.scheme(), "http" | "https").then_some(self.url.as_str())
    }

    /// Host part of the url for display, e.g. `example.com`.
    pub fn display_host(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.url).ok()?;
        let host = url.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyResponse {
    pub keywords: Vec<String>,
    pub results: Vec<SearchResult>,
    pub actual_queries: Vec<String>,
    pub is_fast_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl TransparencyResponse {
    /// Number of results tagged with `keyword`.
    pub fn count_for(&self, keyword: &str) -> usize {
        self.results.iter().filter(|r| r.keyword == keyword).count()
    }

    /// Results whose keyword is not one of the generated keywords.
    pub fn orphaned_results(&self) -> impl Iterator<Item = &SearchResult> {
        self.results
            .iter()
            .filter(move |r| !self.keywords.iter().any(|k| *k == r.keyword))
    }
}

/// Payload shape the model is asked to emit. Everything but the keywords may
/// be omitted by the model.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelPayload {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_shape() {
        let response = TransparencyResponse {
            keywords: vec!["a".into()],
            results: vec![],
            actual_queries: vec!["a".into()],
            is_fast_mode: true,
            answer: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["actualQueries"][0], "a");
        assert_eq!(json["isFastMode"], true);
        assert!(json.get("answer").is_none());
    }

    #[test]
    fn test_display_host() {
        let r = SearchResult::new("k", "t", "https://www.example.com/a?b=c", "s");
        assert_eq!(r.display_host().as_deref(), Some("example.com"));
        let r = SearchResult::new("k", "t", "not a url", "s");
        assert_eq!(r.display_host(), None);
    }

    #[test]
    fn test_link_url_rejects_script_schemes() {
        let ok = SearchResult::new("k", "t", "https://example.com/a", "s");
        assert_eq!(ok.link_url(), Some("https://example.com/a"));
        let plain = SearchResult::new("k", "t", "http://example.com", "s");
        assert!(plain.link_url().is_some());
        for bad in [
            "javascript:alert(document.cookie)",
            "JavaScript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
            "/relative/path",
            "",
        ] {
            assert_eq!(SearchResult::new("k", "t", bad, "s").link_url(), None, "{bad}");
        }
    }

    #[test]
    fn test_orphaned_results() {
        let response = TransparencyResponse {
            keywords: vec!["EV range 2025".into()],
            results: vec![
                SearchResult::new("EV range 2025", "a", "https://example.com/a", ""),
                SearchResult::new("EV pricing", "b", "https://example.com/b", ""),
            ],
            actual_queries: vec![],
            is_fast_mode: false,
            answer: None,
        };
        let orphans: Vec<_> = response.orphaned_results().collect();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].title, "b");
        assert_eq!(response.count_for("EV range 2025"), 1);
    }

    #[test]
    fn test_payload_defaults() {
        let payload: ModelPayload = serde_json::from_str(r#"{"keywords":["x"]}"#).unwrap();
        assert_eq!(payload.keywords, vec!["x"]);
        assert!(payload.results.is_empty());
        assert!(payload.answer.is_none());
    }
}
