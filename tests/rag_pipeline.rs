//! End-to-end pipeline tests with all three upstreams mocked.

use std::sync::Arc;

use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use serde_json::json;

use chroma_rag::config::{ChromaConfig, EmbeddingConfig, GenerationConfig};
use chroma_rag::ingestion::{IngestPipeline, WordChunker};
use chroma_rag::providers::{
    ollama::{OllamaEmbedder, OllamaGenerator},
    ChromaStore, EmbeddingProvider, GenerationProvider,
};
use chroma_rag::retrieval::QueryService;

const DIMS: usize = 8;
const DOCUMENT: &str = "Models: data structures representing business objects.";

struct Pipeline {
    ingest: IngestPipeline,
    query: QueryService,
    store: Arc<ChromaStore>,
}

fn build_pipeline(server: &MockServer) -> Pipeline {
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(&EmbeddingConfig {
        base_url: server.base_url(),
        model: "snowflake-arctic-embed2".to_string(),
        dimensions: DIMS,
        timeout_secs: 5,
    }));

    let generator: Arc<dyn GenerationProvider> =
        Arc::new(OllamaGenerator::new(&GenerationConfig {
            base_url: server.base_url(),
            model: "gemma2".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            timeout_secs: 5,
            stream_timeout_secs: 5,
        }));

    let store = Arc::new(ChromaStore::new(
        &ChromaConfig {
            base_url: server.base_url(),
            collection: "my_collection".to_string(),
        },
        DIMS,
    ));

    let ingest = IngestPipeline::new(
        WordChunker::new(1000),
        Arc::clone(&embedder),
        Arc::clone(&store),
    );
    let query = QueryService::new(embedder, Arc::clone(&store), generator, 20);

    Pipeline {
        ingest,
        query,
        store,
    }
}

async fn mock_collection(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/collections/my_collection");
            then.status(200)
                .json_body(json!({"id": "col-1", "name": "my_collection"}));
        })
        .await;
}

async fn mock_embeddings(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/embeddings");
            then.status(200).json_body(json!({ "embedding": vec![0.5; DIMS] }));
        })
        .await;
}

#[tokio::test]
async fn ingested_chunk_reaches_the_generation_prompt_verbatim() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;
    mock_embeddings(&server).await;

    let upsert = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/collections/col-1/upsert")
                .body_contains(DOCUMENT);
            then.status(200).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-1/query");
            then.status(200).json_body(json!({ "documents": [[DOCUMENT]] }));
        })
        .await;
    // Only matches when the retrieved chunk appears verbatim in the prompt
    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains(DOCUMENT)
                .body_contains("Question: What are models?");
            then.status(200).body(concat!(
                "{\"response\":\"Data structures \",\"done\":false}\n",
                "{\"response\":\"representing business objects.\",\"done\":true}\n",
            ));
        })
        .await;

    let pipeline = build_pipeline(&server);
    pipeline.store.ensure_collection().await.unwrap();

    let stored = pipeline.ingest.ingest(DOCUMENT).await.unwrap();
    assert_eq!(stored, 1);
    upsert.assert_async().await;

    let outcome = pipeline.query.answer("What are models?").await;
    assert_eq!(
        outcome.into_message(),
        "Data structures representing business objects."
    );
    generate.assert_async().await;
}

#[tokio::test]
async fn empty_store_yields_the_no_relevant_information_message() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;
    mock_embeddings(&server).await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-1/query");
            then.status(200).json_body(json!({"documents": [[]]}));
        })
        .await;
    // The prompt must carry the no-context marker; the model has nothing to say
    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("No relevant context was found.");
            then.status(200).body("{\"response\":\"\",\"done\":true}\n");
        })
        .await;

    let pipeline = build_pipeline(&server);
    pipeline.store.ensure_collection().await.unwrap();

    let outcome = pipeline.query.answer("What are models?").await;
    assert_eq!(
        outcome.into_message(),
        "No relevant information was found for the question: \"What are models?\"."
    );
    generate.assert_async().await;
}

#[tokio::test]
async fn blank_question_short_circuits_with_zero_upstream_calls() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = build_pipeline(&server);

    let outcome = pipeline.query.answer("   ").await;
    assert_eq!(outcome.into_message(), "Please provide a valid question.");

    catch_all.assert_hits_async(0).await;
}

#[tokio::test]
async fn ingestion_failure_aborts_the_remaining_chunks() {
    let server = MockServer::start_async().await;
    mock_collection(&server).await;
    mock_embeddings(&server).await;

    let upsert = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/collections/col-1/upsert");
            then.status(500).body("storage unavailable");
        })
        .await;

    let pipeline = build_pipeline(&server);
    pipeline.store.ensure_collection().await.unwrap();

    // Two sentences over a tiny budget would become two chunks; the first
    // upsert failure must stop the batch after one attempt.
    let small = IngestPipeline::new(
        WordChunker::new(3),
        Arc::new(OllamaEmbedder::new(&EmbeddingConfig {
            base_url: server.base_url(),
            model: "snowflake-arctic-embed2".to_string(),
            dimensions: DIMS,
            timeout_secs: 5,
        })),
        Arc::clone(&pipeline.store),
    );

    let err = small
        .ingest("One two three four. Five six seven eight.")
        .await
        .unwrap_err();
    assert!(matches!(err, chroma_rag::Error::Upstream(_)));
    upsert.assert_async().await;
}

#[tokio::test]
async fn blank_document_is_rejected_before_chunking() {
    let server = MockServer::start_async().await;
    let catch_all = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200).json_body(json!({}));
        })
        .await;

    let pipeline = build_pipeline(&server);
    let err = pipeline.ingest.ingest("  \n ").await.unwrap_err();

    assert!(matches!(err, chroma_rag::Error::Validation(_)));
    catch_all.assert_hits_async(0).await;
}
