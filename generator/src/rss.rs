//! RSS 2.0 generation
//!
//! Turns scraped press releases into the feed file served by the API.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use regex::Regex;

use crate::models::PressRelease;

/// Feed written when there is nothing to publish
pub const EMPTY_FEED: &str = "<rss version='2.0'><channel><title>No items</title></channel></rss>";

/// Newest items kept in the feed
pub const MAX_ITEMS: usize = 20;

const ITEM_CATEGORY: &str = "Microcap IR";

/// Channel-level metadata
#[derive(Debug, Clone)]
pub struct FeedMeta {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

impl Default for FeedMeta {
    fn default() -> Self {
        Self {
            title: "Folkborsen Microcap News".to_string(),
            link: "https://folkborsen.se".to_string(),
            description: "Fast RSS feed of Swedish small-cap IR press releases".to_string(),
            language: "sv".to_string(),
        }
    }
}

/// Render `items` as an RSS 2.0 document, timestamped now
pub fn generate_rss(items: &[PressRelease], meta: &FeedMeta, dedupe_by_title: bool) -> Result<String> {
    render_rss(items, meta, dedupe_by_title, Utc::now().naive_utc())
}

/// Render `items` as an RSS 2.0 document.
///
/// Items are deduplicated by link (items without a link are always kept)
/// and, with `dedupe_by_title`, by normalised title. Only the last
/// [`MAX_ITEMS`] survive, in their original order.
pub fn render_rss(
    items: &[PressRelease],
    meta: &FeedMeta,
    dedupe_by_title: bool,
    now: NaiveDateTime,
) -> Result<String> {
    if items.is_empty() {
        return Ok(EMPTY_FEED.to_string());
    }

    let mut unique = dedupe_by_link(items);
    if dedupe_by_title {
        unique = dedupe_by_normalized_title(unique);
    }

    let date_re = Regex::new(r"(\d{4}-\d{2}-\d{2})").context("Invalid date pattern")?;
    let date_of = |text: &str| -> Option<NaiveDateTime> {
        let caps = date_re.captures(text)?;
        NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    };

    let channel_pub = unique
        .iter()
        .filter_map(|item| item.date.as_deref())
        .max()
        .and_then(|d| date_of(d))
        .unwrap_or(now);

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0")]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &meta.title)?;
    text_element(&mut writer, "link", &meta.link)?;
    text_element(&mut writer, "description", &meta.description)?;
    text_element(&mut writer, "language", &meta.language)?;
    text_element(&mut writer, "pubDate", &rfc822(channel_pub))?;
    text_element(&mut writer, "lastBuildDate", &rfc822(now))?;

    let start = unique.len().saturating_sub(MAX_ITEMS);
    for item in &unique[start..] {
        let date = item.date.as_deref().unwrap_or_default();
        let description = match item.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => format!("Source: {} | Date: {}", item.source, date),
        };
        let published = date_of(date).unwrap_or(now);

        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &item.title)?;
        text_element(&mut writer, "link", &item.link)?;
        text_element(&mut writer, "description", &description)?;
        text_element(&mut writer, "pubDate", &rfc822(published))?;
        text_element(&mut writer, "guid", &item.link)?;
        text_element(&mut writer, "category", ITEM_CATEGORY)?;
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(writer.into_inner()).context("Feed is not valid UTF-8")
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn rfc822(dt: NaiveDateTime) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

fn dedupe_by_link(items: &[PressRelease]) -> Vec<PressRelease> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| {
            let link = item.link.trim();
            link.is_empty() || seen.insert(link.to_string())
        })
        .cloned()
        .collect()
}

fn dedupe_by_normalized_title(items: Vec<PressRelease>) -> Vec<PressRelease> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let norm = normalize_title(&item.title);
            norm.is_empty() || seen.insert(norm)
        })
        .collect()
}

/// Lowercase, strip ASCII punctuation, collapse whitespace
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
