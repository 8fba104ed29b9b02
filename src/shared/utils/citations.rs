//! Inline citation rendering for answer text.
//!
//! Answers arrive with numbered `[n]` markers referring to the 1-indexed
//! citation list of the same answer. Substitution runs over the rendered
//! HTML in a single pass; markers without a matching citation are left
//! byte-for-byte untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::Citation;

static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("Invalid regex"));

/// Replace `[n]` markers with links onto the n-th citation's url.
/// Only citations present in `citations` are ever rendered.
pub fn link_citation_markers(html: &str, citations: &[Citation]) -> String {
    if citations.is_empty() {
        return html.to_string();
    }

    CITATION_MARKER
        .replace_all(html, |caps: &regex::Captures| {
            let marker = caps.get(0).map_or("", |m| m.as_str());
            let number = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok());

            match number.and_then(|n| n.checked_sub(1)).and_then(|i| citations.get(i)) {
                Some(citation) => format!(
                    r#"<a href="{}" class="c-citation-link" target="_blank" rel="noopener noreferrer" title="{}">{}</a>"#,
                    escape_attr(&citation.url),
                    escape_attr(&citation.title),
                    marker
                ),
                None => marker.to_string(),
            }
        })
        .to_string()
}

/// Marker numbers that resolve against `citation_count`, in first-appearance
/// order, deduplicated. 1-indexed, matching the markers themselves.
pub fn cited_indices(text: &str, citation_count: usize) -> Vec<usize> {
    let mut seen = Vec::new();
    for caps in CITATION_MARKER.captures_iter(text) {
        if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) {
            if n >= 1 && n <= citation_count && !seen.contains(&n) {
                seen.push(n);
            }
        }
    }
    seen
}

/// Reference-list line for one citation
pub fn format_citation(citation: &Citation) -> String {
    format!("{}. {}", citation.title, citation.attribution())
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SourceKind;

    fn citations(urls: &[&str]) -> Vec<Citation> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| Citation {
                title: format!("Source {}", i + 1),
                url: url.to_string(),
                authors: vec![],
                source: SourceKind::Guideline,
                year: None,
            })
            .collect()
    }

    #[test]
    fn test_marker_becomes_link() {
        let result = link_citation_markers("Aspirin is indicated [1].", &citations(&["https://a.org"]));
        assert!(result.contains(r#"href="https://a.org""#));
        assert!(result.contains(">[1]</a>"));
    }

    #[test]
    fn test_marker_beyond_list_is_untouched() {
        let text = "See [1] and [2].";
        let result = link_citation_markers(text, &citations(&["https://a.org"]));
        assert!(result.contains(">[1]</a>"));
        assert!(result.contains(" and [2]."));
    }

    #[test]
    fn test_zero_marker_is_untouched() {
        let text = "Odd marker [0] here.";
        let result = link_citation_markers(text, &citations(&["https://a.org"]));
        assert_eq!(result, text);
    }

    #[test]
    fn test_empty_citation_list_leaves_text_unchanged() {
        let text = "No sources for [1] or [2].";
        assert_eq!(link_citation_markers(text, &[]), text);
    }

    #[test]
    fn test_repeated_markers_all_resolve() {
        let result = link_citation_markers("[1] then again [1].", &citations(&["https://a.org"]));
        assert_eq!(result.matches(">[1]</a>").count(), 2);
    }

    #[test]
    fn test_non_numeric_brackets_are_untouched() {
        let text = "Checklist [a] and [see note].";
        assert_eq!(link_citation_markers(text, &citations(&["https://a.org"])), text);
    }

    #[test]
    fn test_overflowing_marker_is_untouched() {
        let text = "Bogus [99999999999999999999999] marker.";
        assert_eq!(link_citation_markers(text, &citations(&["https://a.org"])), text);
    }

    #[test]
    fn test_url_is_attribute_escaped() {
        let mut cites = citations(&["https://a.org/q?x=1&y=2"]);
        cites[0].title = r#"Review of "statins""#.to_string();
        let result = link_citation_markers("[1]", &cites);
        assert!(result.contains("x=1&amp;y=2"));
        assert!(result.contains("&quot;statins&quot;"));
    }

    #[test]
    fn test_cited_indices_order_and_dedup() {
        let indices = cited_indices("[2] first, then [1], then [2] again, then [7].", 3);
        assert_eq!(indices, vec![2, 1]);
    }

    #[test]
    fn test_format_citation_line() {
        let citation = Citation {
            title: "AF management".to_string(),
            url: "https://a.org".to_string(),
            authors: vec!["Smith J".to_string()],
            source: SourceKind::Guideline,
            year: Some(2023),
        };
        assert_eq!(format_citation(&citation), "AF management. Smith J · 2023 · Guideline");
    }
}
