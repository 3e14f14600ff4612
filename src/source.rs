//! Where a city's trip CSV comes from: a local file or an HTTP(S) URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::loader::{LoadOutcome, load_bytes};

#[async_trait]
pub trait TripSource: Send + Sync {
    /// Human-readable location, used in logs and errors.
    fn location(&self) -> &str;

    /// Reads the raw (possibly gzip-compressed) CSV payload.
    async fn read(&self) -> Result<Vec<u8>>;
}

pub struct LocalFile {
    path: PathBuf,
    display: String,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl TripSource for LocalFile {
    fn location(&self) -> &str {
        &self.display
    }

    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read trip file '{}'", self.display))
    }
}

pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TripSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn read(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("failed to fetch '{}'", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!("fetching '{}' returned status {}", self.url, status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Picks an HTTP source for `http(s)://` locations, a local file otherwise.
pub fn source_for(location: &str) -> Result<Box<dyn TripSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(LocalFile::new(location)))
    }
}

/// Reads and parses a trip table from `source`.
#[tracing::instrument(skip(source), fields(location = %source.location()))]
pub async fn fetch_table(source: &dyn TripSource) -> Result<LoadOutcome> {
    let bytes = source.read().await?;
    debug!(bytes = bytes.len(), "Trip data received, parsing");
    load_bytes(&bytes).with_context(|| format!("failed to load trips from '{}'", source.location()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const CSV: &str = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 10:00:00,100,A,B,Subscriber
2017-01-02 11:00:00,200,B,A,Customer
";

    struct InMemory(&'static str);

    #[async_trait]
    impl TripSource for InMemory {
        fn location(&self) -> &str {
            "memory"
        }

        async fn read(&self) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        assert_eq!(source_for("https://example.com/chicago.csv").unwrap().location(), "https://example.com/chicago.csv");
        assert_eq!(source_for("data/chicago.csv").unwrap().location(), "data/chicago.csv");
    }

    #[tokio::test]
    async fn test_fetch_table_from_trait_object() {
        let outcome = fetch_table(&InMemory(CSV)).await.unwrap();
        assert_eq!(outcome.table.len(), 2);
    }

    #[tokio::test]
    async fn test_local_file_roundtrip() {
        let path = env::temp_dir().join("bikeshare_stats_test_source.csv");
        fs::write(&path, CSV).unwrap();

        let outcome = fetch_table(&LocalFile::new(&path)).await.unwrap();
        assert_eq!(outcome.table.len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = LocalFile::new("/definitely/not/here/trips.csv");
        let err = fetch_table(&source).await.unwrap_err();
        assert!(err.to_string().contains("failed to read trip file"));
    }
}
