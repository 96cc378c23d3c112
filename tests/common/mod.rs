#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use writeit::db::memory::MemoryStore;
use writeit::state::AppState;
use writeit::storage::client::{MemoryStorageClient, StorageClient};

/// In-process environment: the full router over in-memory repositories.
pub struct TestEnv {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<dyn StorageClient>,
}

impl TestEnv {
    pub fn start() -> Self {
        let store = Arc::new(MemoryStore::new());
        let storage: Arc<dyn StorageClient> = Arc::new(MemoryStorageClient::new());
        let state = AppState::with_store(store.clone(), storage.clone());
        let router = writeit::app::build_router(state.clone());

        Self {
            router,
            state,
            store,
            storage,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Helper: create a document via the API and return its JSON.
    pub async fn create_document(
        &self,
        server: &axum_test::TestServer,
        title: &str,
        content: &str,
        user_id: i64,
    ) -> serde_json::Value {
        server
            .post("/api/v1/documents")
            .json(&serde_json::json!({
                "title": title,
                "type": "ARTICLE",
                "content": content,
                "userId": user_id,
                "tags": "test, integration"
            }))
            .await
            .json::<serde_json::Value>()
    }
}

/// A running MongoDB container and a database handle on it.
///
/// The container is stopped when this struct is dropped.
pub struct MongoEnv {
    _mongo: ContainerAsync<Mongo>,
    pub db: mongodb::Database,
}

impl MongoEnv {
    pub async fn start() -> Self {
        let container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let client = mongodb::Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
            .await
            .expect("Failed to connect to MongoDB");
        let db = client.database(&format!("writeit_test_{}", uuid::Uuid::new_v4().simple()));

        Self {
            _mongo: container,
            db,
        }
    }
}
