//! GitLab HTTP client for API interactions

use futures::future::{BoxFuture, FutureExt};
use log::{debug, trace};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::api;
use crate::error::{GitlabError, Result};
use crate::gitlab::pagination::{collect_pages, ListOptions, Page, PageMeta};
use crate::gitlab::stream::{spawn_pages, PageStream};

/// GitLab API client
///
/// Cheap to clone: the underlying connection pool is shared, so clones can
/// be moved into streaming producer tasks.
#[derive(Clone)]
pub struct GitlabClient {
    client: Client,
    token: String,
    /// API root without trailing slash, e.g. `https://gitlab.example.com/api/v4`
    base_url: String,
}

impl GitlabClient {
    /// Create a client over an already configured HTTP transport
    pub fn new(client: Client, api_url: &str, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client pointing at a mock server
    #[cfg(test)]
    pub fn test_client(base_url: &str) -> Self {
        Self::new(Client::new(), base_url, "test-token")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path starting with `/`
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(api::TOKEN_HEADER, &self.token)
    }

    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    pub(crate) fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.put(url))
    }

    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.delete(url))
    }

    /// Turn a non-2xx response into `GitlabError::Api`
    ///
    /// The server's `message` (or `error`) field is appended when present.
    pub(crate) async fn check_response(
        &self,
        response: reqwest::Response,
        error_context: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = server_message(&body);
        debug!("{} returned {}: {}", error_context, status, body);

        Err(GitlabError::Api {
            status: status.as_u16(),
            message: match detail {
                Some(detail) => format!("Failed to {}: {}", error_context, detail),
                None => format!("Failed to {}", error_context),
            },
        })
    }

    /// Check the status and parse the JSON body
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: reqwest::Response,
        error_context: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.check_response(response, error_context).await?;
        Ok(response.json().await?)
    }

    /// GET a single JSON resource
    pub(crate) async fn get_json<T>(&self, path: &str, error_context: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.get(&url).send().await?;
        self.parse_api_response(response, error_context).await
    }

    /// POST a JSON body and parse the created resource
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B, error_context: &str) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self.post(&url).json(body).send().await?;
        self.parse_api_response(response, error_context).await
    }

    /// PUT a JSON body and parse the updated resource
    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B, error_context: &str) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("PUT {}", url);
        let response = self.put(&url).json(body).send().await?;
        self.parse_api_response(response, error_context).await
    }

    /// DELETE a resource, ignoring any response body
    pub(crate) async fn delete_path(&self, path: &str, error_context: &str) -> Result<()> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        let response = self.delete(&url).send().await?;
        self.check_response(response, error_context).await?;
        Ok(())
    }

    /// Fetch one page of a list endpoint, reading pagination headers
    pub async fn fetch_page<T>(
        &self,
        path: &str,
        opts: ListOptions,
        error_context: &str,
    ) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}?{}", self.url(path), opts.query_string());
        trace!("GET {}", url);

        let response = self.get(&url).send().await?;
        let meta = PageMeta::from_headers(response.headers(), opts.page);
        let items = self.parse_api_response(response, error_context).await?;
        Ok(Page::new(items, meta))
    }

    /// Page fetcher bound to one endpoint, usable from spawned tasks
    pub(crate) fn pager<T>(
        &self,
        path: String,
        error_context: String,
    ) -> impl FnMut(ListOptions) -> BoxFuture<'static, Result<Page<T>>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        move |opts| {
            let client = client.clone();
            let path = path.clone();
            let error_context = error_context.clone();
            async move { client.fetch_page(&path, opts, &error_context).await }.boxed()
        }
    }

    /// Fetch every page of a list endpoint, one request at a time
    pub async fn fetch_all_pages<T>(
        &self,
        path: &str,
        opts: ListOptions,
        error_context: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        collect_pages(opts, self.pager(path.to_string(), error_context.to_string())).await
    }

    /// Stream every page of a list endpoint from a background task
    pub fn stream_all_pages<T>(
        &self,
        path: &str,
        opts: ListOptions,
        error_context: &str,
    ) -> PageStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        spawn_pages(opts, self.pager(path.to_string(), error_context.to_string()))
    }
}

/// Extract GitLab's `message`/`error` field from an error body
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let field = value.get("message").or_else(|| value.get("error"))?;
    Some(match field {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
