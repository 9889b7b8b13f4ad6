//! reqwest-backed implementations of [`DocumentFetcher`] and [`DocumentSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::contract::{DocumentFetcher, DocumentRecord, DocumentSource};
use crate::error::{FetchError, SourceError};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build()
}

/// Plain HTTP GET of document files.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            token: None,
        })
    }

    /// Send `Authorization: Bearer` with every fetch, for backends that
    /// serve files behind the API's auth.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url = %url, "Fetching document");
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        debug!(url = %url, size = bytes.len(), "Fetched document");
        Ok(bytes.to_vec())
    }
}

/// Client of the ERP's document listing and deletion endpoints.
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDocumentSource {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn documents_url(&self, order_id: i64) -> String {
        format!("{}/orders/service-orders/{}/documents/", self.base_url, order_id)
    }

    pub fn delete_url(&self, source_model: &str, source_id: &str) -> String {
        format!("{}/documents/{}/{}/", self.base_url, source_model, source_id)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn list_documents(&self, order_id: i64) -> Result<Vec<DocumentRecord>, SourceError> {
        let url = self.documents_url(order_id);
        info!(url = %url, order_id, "Fetching document listing");

        let response = self.authorized(self.client.get(&url)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!(status = %status, url = %url, "Document listing returned error. Response body: {body}");
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let documents: Vec<DocumentRecord> = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, url = %url, "Failed to decode document listing");
            e
        })?;
        info!(order_id, count = documents.len(), "Document listing received");
        Ok(documents)
    }

    async fn delete_document(&self, record: &DocumentRecord) -> Result<(), SourceError> {
        if !record.deletable {
            return Err(SourceError::NotDeletable {
                id: record.id.clone(),
            });
        }
        let (model, source_id) = match (&record.source_model, &record.source_id) {
            (Some(m), Some(i)) if !m.is_empty() && !i.is_empty() => (m, i),
            _ => {
                return Err(SourceError::MissingSource {
                    id: record.id.clone(),
                })
            }
        };

        let url = self.delete_url(model, source_id);
        info!(url = %url, document_id = %record.id, "Deleting document");
        let response = self.authorized(self.client.delete(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, url = %url, "Document deletion returned error. Response body: {body}");
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        info!(document_id = %record.id, "Document deleted");
        Ok(())
    }
}
