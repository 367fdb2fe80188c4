//! Local feed file store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;

use crate::domain::ports::FeedStore;
use crate::error::FeedError;

/// Feed store backed by a single file on disk
pub struct FsFeedStore {
    path: PathBuf,
}

impl FsFeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeedStore for FsFeedStore {
    async fn read_feed(&self) -> Result<Bytes, FeedError> {
        tokio::fs::read(&self.path)
            .await
            .map(Bytes::from)
            .map_err(|source| FeedError::LocalRead {
                path: self.path.clone(),
                source,
            })
    }
}
