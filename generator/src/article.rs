//! Article enrichment
//!
//! Fetches individual press release pages to replace the listing summary
//! with the article's own headline and first real paragraph.

use std::time::Duration;

use anyhow::Result;
use scraper::Html;

use crate::client::{PageClient, ARTICLE_TIMEOUT};
use crate::html::{joined_text, selector};
use crate::models::PressRelease;
use crate::robots::RobotsCache;

/// Paragraphs this short are bylines, dates or share links
const MIN_EXCERPT_CHARS: usize = 30;

#[derive(Debug, Default, PartialEq)]
pub struct ArticleFields {
    pub title: Option<String>,
    pub excerpt: Option<String>,
}

/// First `<h1>` and first paragraph longer than 30 characters
pub fn extract_article_fields(html: &str) -> Result<ArticleFields> {
    let doc = Html::parse_document(html);
    let h1 = selector("h1")?;
    let p = selector("p")?;

    let title = doc.select(&h1).next().map(joined_text);
    let excerpt = doc
        .select(&p)
        .map(joined_text)
        .find(|text| text.chars().count() > MIN_EXCERPT_CHARS);

    Ok(ArticleFields { title, excerpt })
}

/// Apply fetched article fields to an item
pub fn apply_fields(item: &mut PressRelease, fields: ArticleFields) {
    if let Some(title) = &fields.title {
        item.title = title.clone();
    }
    if let Some(excerpt) = &fields.excerpt {
        item.summary = Some(excerpt.clone());
    }
    item.article_title = fields.title;
    item.article_excerpt = fields.excerpt;
}

/// Enrich up to `max_fetch` items, pausing `delay` after each attempt.
///
/// Links disallowed by the site's robots.txt are not fetched. A skipped
/// or failed fetch leaves its item untouched.
pub async fn enrich_with_articles(
    client: &PageClient,
    items: &mut [PressRelease],
    max_fetch: usize,
    delay: Duration,
) {
    let mut robots = RobotsCache::new();
    let mut fetched = 0;
    for item in items.iter_mut() {
        if fetched >= max_fetch {
            break;
        }
        if item.link.is_empty() {
            continue;
        }

        if !robots.allowed(client, &item.link).await {
            tracing::info!(link = %item.link, "Article disallowed by robots.txt");
            fetched += 1;
            tokio::time::sleep(delay).await;
            continue;
        }

        let fields = client
            .get_text(&item.link, ARTICLE_TIMEOUT)
            .await
            .and_then(|html| extract_article_fields(&html));
        match fields {
            Ok(fields) => apply_fields(item, fields),
            Err(e) => tracing::warn!(link = %item.link, error = %e, "Article fetch failed"),
        }

        fetched += 1;
        tokio::time::sleep(delay).await;
    }
}
