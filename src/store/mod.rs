use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod firestore;

pub use firestore::FirestoreClient;

/// Destination for book documents.
///
/// The one operation this tool consumes is "create a new document with a
/// given field set in a given collection". The production implementation
/// is [`FirestoreClient`]; tests substitute an in-memory store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with an auto-generated id in `collection` and
    /// return that id.
    async fn create_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String>;
}
