//! HTTP client for the hosted document store.
//!
//! Records live in a named collection behind a JSON document API:
//! `POST {base}/v1/collections/{collection}/documents` appends one document
//! and answers with the stored form; `GET` on the same path with
//! `order_by`/`direction` query parameters returns the whole collection.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{RecordStore, Result, StoreError};
use crate::record::AttendanceRecord;

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<AttendanceRecord>,
}

/// Store client for the hosted document API.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    documents_url: Url,
    api_key: Option<String>,
}

impl RestStore {
    /// Create a client for `collection` on the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the documents endpoint cannot be derived from
    /// the base URL.
    pub fn new(
        base_url: &Url,
        collection: &str,
        api_key: Option<String>,
    ) -> std::result::Result<Self, url::ParseError> {
        Ok(Self {
            client: Client::new(),
            documents_url: base_url.join(&format!("v1/collections/{collection}/documents"))?,
            api_key,
        })
    }

    /// The resolved documents endpoint.
    #[must_use]
    pub fn documents_url(&self) -> &Url {
        &self.documents_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key.as_str()),
            None => request,
        }
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn append(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        let request = self.client.post(self.documents_url.clone()).json(record);
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<AttendanceRecord>()
            .await
            .map_err(|e| StoreError::Decode {
                message: e.to_string(),
            })
    }

    async fn fetch_all(&self) -> Result<Vec<AttendanceRecord>> {
        let request = self
            .client
            .get(self.documents_url.clone())
            .query(&[("order_by", "timestamp"), ("direction", "desc")]);
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }

        let list: DocumentList = response.json().await.map_err(|e| StoreError::Decode {
            message: e.to_string(),
        })?;
        Ok(list.documents)
    }
}
