// adresowo.pl page fetching
use crate::model::{BASE_URL, FetchError};
use reqwest::Client;
use std::time::Duration;

/// Browser-like user agent, the site blocks obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam between the page loop and the network, so the loop can be driven by
/// scripted pages in tests.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_page(&self, city: &str, page: u32) -> Result<String, FetchError>;
}

pub struct AdresowoFetcher {
    client: Client,
}

impl AdresowoFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    fn build_url(city: &str, page: u32) -> String {
        format!("{BASE_URL}/mieszkania/{city}/_l{page}")
    }
}

#[async_trait::async_trait]
impl Fetcher for AdresowoFetcher {
    async fn fetch_page(&self, city: &str, page: u32) -> Result<String, FetchError> {
        let url = Self::build_url(city, page);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_template() {
        assert_eq!(
            AdresowoFetcher::build_url("lodz", 3),
            "https://adresowo.pl/mieszkania/lodz/_l3"
        );
    }
}
