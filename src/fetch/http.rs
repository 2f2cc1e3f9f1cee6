//! reqwest-backed HTTP getter

use tracing::{debug, warn};

use crate::fetch::HttpGetter;
use crate::version::error::FetchError;

pub struct ReqwestGetter {
    client: reqwest::Client,
}

impl ReqwestGetter {
    /// Creates a getter sending `user_agent` with every request
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpGetter for ReqwestGetter {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
