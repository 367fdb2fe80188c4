//! Press release items

use serde::Serialize;

/// One press release as it ends up in the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PressRelease {
    pub title: String,
    pub link: String,
    /// `YYYY-MM-DD` when known
    pub date: Option<String>,
    pub summary: Option<String>,
    pub source: String,
    /// Filled in by article enrichment
    pub article_title: Option<String>,
    pub article_excerpt: Option<String>,
}

impl PressRelease {
    /// Deterministic items used when scraping fails
    pub fn samples(date: &str) -> Vec<PressRelease> {
        (1..=2)
            .map(|n| PressRelease {
                title: format!("Sample {n}"),
                link: format!("https://folkborsen.se/sample-{n}"),
                date: Some(date.to_string()),
                source: "CI".to_string(),
                ..Default::default()
            })
            .collect()
    }
}
