//! robots.txt checks for article fetches
//!
//! One parsed robots.txt per origin, fetched on first use. A robots.txt
//! that is missing, unreachable or unparseable allows everything.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Url;
use texting_robots::Robot;

use crate::client::PageClient;

/// Product token matched against `User-agent` lines
pub const ROBOTS_AGENT: &str = "folkborsen-scraper";

const ROBOTS_TIMEOUT: Duration = Duration::from_secs(8);

/// Per-origin cache of robots.txt rules
#[derive(Default)]
pub struct RobotsCache {
    rules: HashMap<String, Option<Robot>>,
}

impl RobotsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `url` may be fetched by the scraper
    pub async fn allowed(&mut self, client: &PageClient, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return true;
        };
        let origin = parsed.origin().ascii_serialization();

        if !self.rules.contains_key(&origin) {
            let robot = fetch_rules(client, &origin).await;
            self.rules.insert(origin.clone(), robot);
        }

        match self.rules.get(&origin) {
            Some(Some(robot)) => robot.allowed(url),
            _ => true,
        }
    }
}

async fn fetch_rules(client: &PageClient, origin: &str) -> Option<Robot> {
    let robots_url = format!("{}/robots.txt", origin);
    match client.get_text(&robots_url, ROBOTS_TIMEOUT).await {
        Ok(txt) => match Robot::new(ROBOTS_AGENT, txt.as_bytes()) {
            Ok(robot) => Some(robot),
            Err(e) => {
                tracing::debug!(url = %robots_url, error = %e, "Unparseable robots.txt");
                None
            }
        },
        Err(e) => {
            tracing::debug!(url = %robots_url, error = %e, "No robots.txt, allowing all");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use axum::{routing::get, Router};

    async fn spawn(router: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn disallowed_path_is_refused() {
        let addr = spawn(Router::new().route(
            "/robots.txt",
            get(|| async { "User-agent: *\nDisallow: /private/\n" }),
        ))
        .await;
        let client = PageClient::new().unwrap();
        let mut cache = RobotsCache::new();

        assert!(!cache.allowed(&client, &format!("http://{addr}/private/release")).await);
        assert!(cache.allowed(&client, &format!("http://{addr}/news/release")).await);
    }

    #[tokio::test]
    async fn missing_robots_allows_everything() {
        let addr = spawn(Router::new()).await;
        let client = PageClient::new().unwrap();
        let mut cache = RobotsCache::new();

        assert!(cache.allowed(&client, &format!("http://{addr}/private/release")).await);
    }

    #[tokio::test]
    async fn robots_is_fetched_once_per_origin() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let addr = spawn(Router::new().route(
            "/robots.txt",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "User-agent: *\nAllow: /\n"
                }
            }),
        ))
        .await;
        let client = PageClient::new().unwrap();
        let mut cache = RobotsCache::new();

        for n in 0..3 {
            assert!(cache.allowed(&client, &format!("http://{addr}/release-{n}")).await);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
