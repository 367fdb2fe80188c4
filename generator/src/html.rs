//! Small helpers over the `scraper` API

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid selector {}: {:?}", css, e))
}

/// Text of an element with each text node trimmed, joined by single spaces
pub fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
