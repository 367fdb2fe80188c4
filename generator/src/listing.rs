//! Press release listing scraper
//!
//! Parses the Freemelt investor press release listing. Each release is a
//! `.investor-blocks-content-inner-press-releases-item` node holding a link,
//! a date in `div.upper span.pre-title` and a summary paragraph.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use scraper::Html;

use crate::html::{joined_text, selector};
use crate::models::PressRelease;

pub const LISTING_URL: &str = "https://freemelt.com/investors/press-releases/";

const ITEM_SELECTOR: &str = ".investor-blocks-content-inner-press-releases-item";
const SOURCE: &str = "freemelt.com";

/// Datetime layouts accepted besides RFC 3339, `T` or space separated
const ISO_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Extract press releases from a listing page.
///
/// Hidden nodes (`style="display: none"`) are skipped unless
/// `include_hidden` is set. Results are deduplicated by link, first wins.
pub fn parse_listing(html: &str, include_hidden: bool) -> Result<Vec<PressRelease>> {
    let doc = Html::parse_document(html);
    let item_sel = selector(ITEM_SELECTOR)?;
    let link_sel = selector("a")?;
    let date_sel = selector("div.upper span.pre-title")?;
    let para_sel = selector("p")?;
    let today = Utc::now().date_naive().to_string();

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for node in doc.select(&item_sel) {
        let hidden = node
            .value()
            .attr("style")
            .map(|s| s.to_lowercase().contains("display: none"))
            .unwrap_or(false);
        if hidden && !include_hidden {
            continue;
        }

        let Some(href) = node
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let link = href.trim().to_string();
        if link.is_empty() || !seen.insert(link.clone()) {
            continue;
        }

        let date = node
            .select(&date_sel)
            .next()
            .map(joined_text)
            .and_then(|text| parse_date(&text))
            .unwrap_or_else(|| today.clone());

        let summary = node
            .select(&para_sel)
            .next()
            .map(joined_text)
            .unwrap_or_default();

        out.push(PressRelease {
            title: summary.clone(),
            link,
            date: Some(date),
            summary: Some(summary),
            source: SOURCE.to_string(),
            article_title: None,
            article_excerpt: None,
        });
    }

    Ok(out)
}

/// Normalise a listing date to `YYYY-MM-DD`.
///
/// Accepts ISO dates and datetimes (`T` or space separated, optional
/// seconds, fraction and offset), `8 Oct 2025` and `8 October 2025`.
/// Anything else containing a four digit year becomes January 1st of it.
pub fn parse_date(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let parsed = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ISO_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| iso_date_prefix(text))
        .or_else(|| NaiveDate::parse_from_str(text, "%d %b %Y").ok())
        .or_else(|| NaiveDate::parse_from_str(text, "%d %B %Y").ok());

    if let Some(date) = parsed {
        return Some(date.to_string());
    }

    let year = Regex::new(r"(\d{4})").ok()?;
    year.captures(text).map(|c| format!("{}-01-01", &c[1]))
}

/// `YYYY-MM-DD` followed by a `T` or space separated time in any form,
/// e.g. with a UTC offset
fn iso_date_prefix(text: &str) -> Option<NaiveDate> {
    let (date, rest) = text.split_at_checked(10)?;
    if !rest.starts_with(['T', ' ']) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}
