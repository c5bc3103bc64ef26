use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    dao::{
        models::{CategoryEntity, CategorySummaryEntity},
        source::SourceResult,
        trivia_source::TriviaSource,
    },
    state::board::CategoryId,
};

use super::{
    config::JServiceConfig,
    error::{JServiceError, JServiceResult},
};

const CATEGORIES_PATH: &str = "categories";
const CATEGORY_PATH: &str = "category";

/// Trivia API client speaking the jService wire format.
#[derive(Clone)]
pub struct JServiceSource {
    client: Client,
    base_url: Arc<str>,
}

impl JServiceSource {
    /// Build the HTTP client for the configured API.
    pub fn new(config: JServiceConfig) -> JServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| JServiceError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> JServiceResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "requesting trivia API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| JServiceError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JServiceError::RequestStatus {
                path: path.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| JServiceError::ReadBody {
                path: path.to_string(),
                source,
            })?;

        decode_body(path, &body)
    }
}

/// Decode a response body, keeping transport and schema failures apart.
fn decode_body<T>(path: &str, body: &[u8]) -> JServiceResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| JServiceError::DecodeBody {
        path: path.to_string(),
        source,
    })
}

impl TriviaSource for JServiceSource {
    fn list_categories(
        &self,
        count: usize,
    ) -> BoxFuture<'static, SourceResult<Vec<CategorySummaryEntity>>> {
        let source = self.clone();
        Box::pin(async move {
            source
                .get_json(CATEGORIES_PATH, &[("count", count.to_string())])
                .await
                .map_err(Into::into)
        })
    }

    fn get_category(&self, id: CategoryId) -> BoxFuture<'static, SourceResult<CategoryEntity>> {
        let source = self.clone();
        Box::pin(async move {
            source
                .get_json(CATEGORY_PATH, &[("id", id.to_string())])
                .await
                .map_err(Into::into)
        })
    }
}
