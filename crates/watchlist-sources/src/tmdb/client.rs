use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use watchlist_config::TmdbConfig;
use watchlist_models::{MediaDetail, MediaType, SearchPage};

use crate::error::ClientError;
use crate::http;
use crate::traits::MetadataApi;

const SERVICE: &str = "tmdb";

/// Client for The Movie Database v3 API
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: Url,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(client: Client, base_url: Url, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            language: None,
        }
    }

    pub fn from_config(config: &TmdbConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl {
            service: SERVICE,
            message: e.to_string(),
        })?;
        let client = http::build_client(SERVICE, config.timeout_secs, config.accept_invalid_certs)?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                service: SERVICE,
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .push("3")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(operation = "tmdb_request", path = url.path(), "Calling metadata API");

        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(&[("api_key", self.api_key.as_str())])
            .query(params);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;

        if !response.status().is_success() {
            return Err(http::status_error(SERVICE, response).await);
        }

        http::decode_json(SERVICE, response).await
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn search_multi(&self, query: &str) -> Result<SearchPage, ClientError> {
        self.get_json(&["search", "multi"], &[("query", query)]).await
    }

    async fn similar(&self, media_type: MediaType, id: u64) -> Result<SearchPage, ClientError> {
        let id = id.to_string();
        self.get_json(&[media_type.as_str(), &id, "similar"], &[]).await
    }

    async fn detail(&self, media_type: MediaType, id: u64) -> Result<MediaDetail, ClientError> {
        let id = id.to_string();
        self.get_json(&[media_type.as_str(), &id], &[]).await
    }
}
