use std::time::Duration;

use reqwest::Client;

use crate::error::AppError;

/// Plain unauthenticated GET client shared by the search and detail stages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch a page and return its body. Non-2xx responses are errors; there are no retries.
    pub async fn get_html(&self, url: &str) -> Result<String, AppError> {
        let resp = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(resp.text().await?)
    }
}
