//! Prompt templates for the two search modes.

/// Fast mode: keywords plus a description of what would be searched. No tool use.
pub fn fast_mode_prompt(query: &str) -> String {
    format!(
        r#"You are a search strategist. A user asked: "{query}"

Break the request into 4 to 6 focused search keywords that together cover what
the user wants to know. Do not search the web. Instead, write a short answer
explaining what you would search for with each keyword and why.

Respond with raw JSON only, no markdown, in exactly this shape:
{{
  "keywords": ["keyword 1", "keyword 2"],
  "answer": "what you would search for and why"
}}"#
    )
}

/// Full mode: keywords, real web search per keyword, tagged sources, synthesized answer.
pub fn full_mode_prompt(query: &str) -> String {
    format!(
        r#"You are a transparent search assistant. A user asked: "{query}"

1. Break the request into 4 to 6 focused search keywords.
2. Use Google Search to look up each keyword.
3. For every useful source you find, record which keyword it answers.
4. Write a concise answer to the original request based on those sources.

Respond with raw JSON only, no markdown, in exactly this shape:
{{
  "keywords": ["keyword 1", "keyword 2"],
  "results": [
    {{ "keyword": "keyword 1", "title": "page title", "url": "https://...", "snippet": "relevant excerpt" }}
  ],
  "answer": "synthesized answer"
}}
Every result's "keyword" must be copied exactly from the "keywords" list."#
    )
}

pub fn build_prompt(query: &str, fast_mode: bool) -> String {
    if fast_mode {
        fast_mode_prompt(query)
    } else {
        full_mode_prompt(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_query() {
        let q = "best electric cars in 2025";
        assert!(build_prompt(q, true).contains(q));
        assert!(build_prompt(q, false).contains(q));
    }

    #[test]
    fn test_fast_prompt_skips_search() {
        let p = fast_mode_prompt("x");
        assert!(p.contains("Do not search the web"));
        assert!(!p.contains("\"results\""));
    }

    #[test]
    fn test_full_prompt_requests_tagged_results() {
        let p = full_mode_prompt("x");
        assert!(p.contains("Google Search"));
        assert!(p.contains("\"results\""));
        assert!(p.contains("raw JSON only"));
    }
}
