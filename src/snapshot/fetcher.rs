use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use super::decode::decode_snapshot;
use super::error::FetchError;
use super::types::Point;

/// Anything that can produce one hour's worth of positions.
///
/// Implementations never fail: an unusable hour comes back as `None`.
pub trait SnapshotSource: Send + Sync {
    fn fetch_hour(&self, hour: usize) -> impl Future<Output = Option<Vec<Point>>> + Send;
}

/// Fetches `{base_url}/{hour:02}.json` over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, hour: usize) -> String {
        format!("{}/{:02}.json", self.base_url, hour)
    }

    async fn try_fetch(&self, hour: usize) -> Result<Vec<Point>, FetchError> {
        let response = self.client.get(self.url_for(hour)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        decode_snapshot(&body)
    }
}

impl SnapshotSource for HttpSource {
    async fn fetch_hour(&self, hour: usize) -> Option<Vec<Point>> {
        match self.try_fetch(hour).await {
            Ok(points) => Some(points),
            Err(e) => {
                log::warn!("Hour {:02} unavailable: {}", hour, e);
                None
            }
        }
    }
}
