//! Test fixtures

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// A small but realistic feed file
pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Folkborsen Microcap News</title><link>https://folkborsen.se</link><description>Fast RSS feed of Swedish small-cap IR press releases</description><language>sv</language><item><title>Freemelt tecknar order</title><link>https://freemelt.com/mfn_news/order/</link><guid>https://freemelt.com/mfn_news/order/</guid><category>Microcap IR</category></item></channel></rss>
"#;

/// Serve `router` on an ephemeral local port for the rest of the test
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A local port with nothing listening on it
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
