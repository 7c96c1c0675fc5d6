use async_trait::async_trait;
use clinic_migrator_shared::SourceRecord;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::decode::decode_fields;
use crate::{SourceStore, SourceStoreError};

/// Largest page the list endpoint accepts.
const PAGE_SIZE: usize = 300;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Source store that reads collections from the Firestore REST API.
pub struct FirestoreSource {
    base_url: String,
    project_id: String,
    database: String,
    access_token: Option<String>,
    client: ReqwestClient,
}

impl FirestoreSource {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        database: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database: database.into(),
            access_token,
            client: ReqwestClient::new(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database, collection
        )
    }

    async fn fetch_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, SourceStoreError> {
        let mut request = self
            .client
            .get(self.collection_url(collection))
            .query(&[("pageSize", PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        if let Some(access_token) = &self.access_token {
            request = request.bearer_auth(access_token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceStoreError::collection_not_found(collection));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceStoreError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ListDocumentsResponse>().await?)
    }
}

#[async_trait]
impl SourceStore for FirestoreSource {
    async fn fetch_collection(
        &self,
        collection: &str,
    ) -> Result<Vec<SourceRecord>, SourceStoreError> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(collection, page_token.as_deref()).await?;
            debug!(
                collection,
                documents = page.documents.len(),
                "Fetched Firestore page"
            );

            for document in page.documents {
                records.push(SourceRecord::new(
                    document_id(&document.name),
                    decode_fields(&document.fields)?,
                ));
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!(collection, records = records.len(), "Read Firestore collection");
        Ok(records)
    }
}

/// Last path segment of a document resource name.
fn document_id(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}
