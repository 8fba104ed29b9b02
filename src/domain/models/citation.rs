use serde::{Deserialize, Deserializer, Serialize};

/// Where a cited source comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Clinical practice guideline
    Guideline,
    /// Peer-reviewed journal article
    Journal,
    /// Drug monograph / prescribing information
    Drug,
    /// Anything else the answer service returned
    #[default]
    Web,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Guideline => "guideline",
            SourceKind::Journal => "journal",
            SourceKind::Drug => "drug",
            SourceKind::Web => "web",
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match self {
            SourceKind::Guideline => "Guideline",
            SourceKind::Journal => "Journal",
            SourceKind::Drug => "Drug Info",
            SourceKind::Web => "Source",
        }
    }
}

// Upstream services label sources loosely; anything unrecognized is "web"
fn lenient_source_kind<'de, D>(deserializer: D) -> Result<SourceKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match raw.to_lowercase().as_str() {
        "guideline" => SourceKind::Guideline,
        "journal" => SourceKind::Journal,
        "drug" => SourceKind::Drug,
        _ => SourceKind::Web,
    })
}

/// Structured reference attached to an assistant answer.
/// Rendered inline via numbered `[n]` markers in the answer text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,

    pub url: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default, deserialize_with = "lenient_source_kind")]
    pub source: SourceKind,

    #[serde(default)]
    pub year: Option<u16>,
}

impl Citation {
    /// One-line attribution used in citation lists and snapshot footers
    pub fn attribution(&self) -> String {
        let mut parts = Vec::new();

        if !self.authors.is_empty() {
            // "Smith et al." past two authors, full list otherwise
            if self.authors.len() > 2 {
                parts.push(format!("{} et al.", self.authors[0]));
            } else {
                parts.push(self.authors.join(", "));
            }
        }

        if let Some(year) = self.year {
            parts.push(year.to_string());
        }

        parts.push(self.source.badge_label().to_string());
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_citation(authors: &[&str], year: Option<u16>) -> Citation {
        Citation {
            title: "Hypertension management".to_string(),
            url: "https://example.org/htn".to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            source: SourceKind::Guideline,
            year,
        }
    }

    #[test]
    fn test_attribution_truncates_long_author_lists() {
        let citation = make_citation(&["Smith J", "Jones K", "Lee P"], Some(2023));
        assert_eq!(citation.attribution(), "Smith J et al. · 2023 · Guideline");
    }

    #[test]
    fn test_attribution_without_authors_or_year() {
        let citation = make_citation(&[], None);
        assert_eq!(citation.attribution(), "Guideline");
    }

    #[test]
    fn test_unknown_source_labels_fall_back_to_web() {
        let citation: Citation =
            serde_json::from_str(r#"{"title":"t","url":"u","source":"podcast"}"#).unwrap();
        assert_eq!(citation.source, SourceKind::Web);
    }

    #[test]
    fn test_missing_source_defaults_to_web() {
        let citation: Citation = serde_json::from_str(r#"{"title":"t","url":"u"}"#).unwrap();
        assert_eq!(citation.source, SourceKind::Web);
    }

    #[test]
    fn test_source_kind_round_trip() {
        let json = serde_json::to_string(&SourceKind::Journal).unwrap();
        assert_eq!(json, r#""journal""#);
    }
}
