//! ChromaDB client: collection lifecycle, upsert, and similarity query

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::config::ChromaConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

const API_PATH: &str = "/api/v1";

/// Resolved collection identity: the server-assigned UUID for the configured
/// collection name. Produced exactly once per process by
/// [`ChromaStore::ensure_collection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    /// Server-assigned collection UUID
    pub id: String,
    /// Collection name
    pub name: String,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct CreateCollectionRequest {
    name: String,
}

#[derive(Serialize)]
struct DocumentMetadata {
    source: String,
}

#[derive(Serialize)]
struct UpsertRequest {
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    metadatas: Vec<DocumentMetadata>,
    ids: Vec<String>,
}

#[derive(Serialize)]
struct VectorQueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: Vec<&'static str>,
}

#[derive(Deserialize)]
struct VectorQueryResponse {
    // Outer: one entry per query vector; inner: ranked result texts.
    // Absent entirely when the store has nothing to report.
    documents: Option<Vec<Vec<String>>>,
}

/// ChromaDB vector store bound to one named collection.
///
/// The collection UUID resolves once per process lifetime through a
/// single-assignment cell; upsert and query reject calls made before
/// resolution. There is no refresh; a collection deleted remotely after
/// resolution goes unnoticed.
pub struct ChromaStore {
    client: Client,
    config: ChromaConfig,
    dimensions: usize,
    handle: OnceCell<CollectionHandle>,
}

impl ChromaStore {
    /// Create a new store; the collection is not resolved yet
    pub fn new(config: &ChromaConfig, dimensions: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config: config.clone(),
            dimensions,
            handle: OnceCell::new(),
        }
    }

    /// Resolve the collection, creating it if absent.
    ///
    /// Idempotent and safe under concurrent first-callers: the cell
    /// serializes initialization, so exactly one lookup/create sequence runs
    /// and every caller converges on the same UUID. A failed attempt leaves
    /// the cell unset so a later call can retry.
    pub async fn ensure_collection(&self) -> Result<&CollectionHandle> {
        self.handle
            .get_or_try_init(|| self.resolve_collection())
            .await
    }

    async fn resolve_collection(&self) -> Result<CollectionHandle> {
        match self.fetch_collection().await {
            Ok(handle) => {
                tracing::info!(
                    "Collection {} already exists with UUID {}",
                    handle.name,
                    handle.id
                );
                Ok(handle)
            }
            Err(Error::CollectionMissing(name)) => {
                tracing::info!("Collection {} does not exist, creating it", name);
                self.create_collection().await
            }
            Err(e) => {
                tracing::error!(
                    "Failed to resolve collection {}: {}",
                    self.config.collection,
                    e
                );
                Err(e)
            }
        }
    }

    /// Fetch the collection by name.
    ///
    /// Both a 404 and a 500 whose body says the collection does not exist
    /// signal absence; the upstream API reports the two inconsistently and
    /// this normalizes them. The message match is a compatibility shim for
    /// the ChromaDB version this targets, not a general contract.
    async fn fetch_collection(&self) -> Result<CollectionHandle> {
        let url = format!(
            "{}{}/collections/{}",
            self.config.base_url, API_PATH, self.config.collection
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("collection lookup failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let info: CollectionInfo = response.json().await.map_err(|e| {
                Error::upstream(format!("failed to parse collection response: {}", e))
            })?;
            return Ok(CollectionHandle {
                id: info.id,
                name: info.name,
            });
        }

        let body = response.text().await.unwrap_or_default();
        let missing_message = format!("Collection {} does not exist", self.config.collection);
        if status == StatusCode::NOT_FOUND
            || (status == StatusCode::INTERNAL_SERVER_ERROR && body.contains(&missing_message))
        {
            return Err(Error::CollectionMissing(self.config.collection.clone()));
        }

        Err(Error::upstream(format!(
            "collection lookup failed: HTTP {} - {}",
            status, body
        )))
    }

    async fn create_collection(&self) -> Result<CollectionHandle> {
        let url = format!("{}{}/collections", self.config.base_url, API_PATH);
        let request = CreateCollectionRequest {
            name: self.config.collection.clone(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("collection creation failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(format!(
                "collection creation failed: HTTP {} - {}",
                status, body
            )));
        }

        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("failed to parse creation response: {}", e)))?;

        tracing::info!("Collection {} created with UUID {}", info.name, info.id);
        Ok(CollectionHandle {
            id: info.id,
            name: info.name,
        })
    }

    fn resolved(&self) -> Result<&CollectionHandle> {
        self.handle
            .get()
            .ok_or_else(|| Error::state("collection UUID has not been resolved"))
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::InvalidEmbedding {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        Ok(())
    }

    /// Store one chunk with its embedding.
    ///
    /// Validation and the resolved-state check both run before any network
    /// call. No read-after-write verification.
    pub async fn upsert(&self, chunk: &Chunk, embedding: &[f32]) -> Result<()> {
        if chunk.text.trim().is_empty() {
            return Err(Error::validation("document text must not be empty"));
        }
        self.check_dimensions(embedding)?;
        let handle = self.resolved()?;

        let request = UpsertRequest {
            documents: vec![chunk.text.clone()],
            embeddings: vec![embedding.to_vec()],
            metadatas: vec![DocumentMetadata {
                source: chunk.source_tag.clone(),
            }],
            ids: vec![format!("doc_{}", Uuid::new_v4())],
        };

        tracing::debug!("Upserting document ({} dims)", embedding.len());

        let url = format!(
            "{}{}/collections/{}/upsert",
            self.config.base_url, API_PATH, handle.id
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("upsert failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(format!(
                "upsert failed: HTTP {} - {}",
                status, body
            )));
        }

        tracing::info!("Document added to collection {}", handle.name);
        Ok(())
    }

    /// Retrieve the texts of the `top_k` chunks most similar to `embedding`.
    ///
    /// A miss is a normal outcome: an absent result payload or zero matches
    /// yields an empty list, never an error.
    pub async fn query(&self, embedding: &[f32], top_k: usize) -> Result<Vec<String>> {
        self.check_dimensions(embedding)?;
        let handle = self.resolved()?;

        let request = VectorQueryRequest {
            query_embeddings: vec![embedding.to_vec()],
            n_results: top_k,
            include: vec!["documents", "metadatas", "distances"],
        };

        let url = format!(
            "{}{}/collections/{}/query",
            self.config.base_url, API_PATH, handle.id
        );
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("query failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(format!(
                "query failed: HTTP {} - {}",
                status, body
            )));
        }

        let body: VectorQueryResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("failed to parse query response: {}", e)))?;

        // First inner sequence is the result set for the sole query vector
        let documents = body
            .documents
            .and_then(|docs| docs.into_iter().next())
            .unwrap_or_default();

        tracing::debug!("Query returned {} documents", documents.len());
        Ok(documents)
    }
}
