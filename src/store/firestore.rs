use std::{path::Path, sync::Arc};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use google_cloud_auth::{
    credentials::CredentialsFile, project::Config, token::DefaultTokenSourceProvider,
};
use google_cloud_token::{TokenSource, TokenSourceProvider};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::DocumentStore;

const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/datastore"];

/// Firestore REST client covering the single call this tool needs:
/// `createDocument` against a collection of the `(default)` database.
pub struct FirestoreClient {
    http: reqwest::Client,
    token_source: Arc<dyn TokenSource>,
    project_id: String,
}

#[derive(Deserialize)]
struct CreatedDocument {
    /// Full resource name, e.g.
    /// `projects/p/databases/(default)/documents/books/AbC123`.
    name: String,
}

impl FirestoreClient {
    /// Authenticate with the service-account key file at `credentials_path`.
    /// The project id is taken from the key file.
    pub async fn new(credentials_path: &Path) -> Result<Self> {
        let credentials = CredentialsFile::new_from_file(credentials_path.display().to_string())
            .await
            .with_context(|| {
                format!("reading credential file {}", credentials_path.display())
            })?;
        let provider = DefaultTokenSourceProvider::new_with_credentials(
            Config::default().with_scopes(&SCOPES),
            Box::new(credentials),
        )
        .await
        .context("building token source from service-account key")?;
        let project_id = provider
            .project_id
            .clone()
            .ok_or_else(|| anyhow!("credential file carries no project_id"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            token_source: provider.token_source(),
            project_id,
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents/{}",
            self.project_id, collection
        )
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn create_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String> {
        let authorization = self
            .token_source
            .token()
            .await
            .map_err(|e| anyhow!("fetching access token: {}", e))?;
        let body = json!({ "fields": encode_fields(fields) });

        let resp = self
            .http
            .post(self.collection_url(collection))
            .header(AUTHORIZATION, authorization)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("createDocument request to `{}`", collection))?
            .error_for_status()
            .with_context(|| format!("createDocument in `{}` rejected", collection))?;

        let created: CreatedDocument = resp
            .json()
            .await
            .context("decoding createDocument response")?;
        let doc_id = document_id(&created.name).to_string();
        debug!(collection, doc_id = %doc_id, "created document");
        Ok(doc_id)
    }
}

/// Trailing segment of a document resource name.
fn document_id(resource_name: &str) -> &str {
    resource_name
        .rsplit('/')
        .next()
        .unwrap_or(resource_name)
}

fn encode_fields(fields: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), encode_value(value)))
        .collect();
    Value::Object(encoded)
}

/// Encode a JSON value as a Firestore typed value. Integers travel as
/// strings per the REST API; everything else keeps its JSON shape inside
/// the type wrapper.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_book_field_types() {
        assert_eq!(
            encode_value(&json!("Dune")),
            json!({ "stringValue": "Dune" })
        );
        assert_eq!(encode_value(&json!(4.8)), json!({ "doubleValue": 4.8 }));
        assert_eq!(
            encode_value(&json!(5)),
            json!({ "integerValue": "5" })
        );
        assert_eq!(encode_value(&Value::Null), json!({ "nullValue": null }));
        assert_eq!(
            encode_value(&json!(true)),
            json!({ "booleanValue": true })
        );
    }

    #[test]
    fn encodes_field_map() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("Dune"));
        fields.insert("rating".to_string(), json!(4.8));
        assert_eq!(
            encode_fields(&fields),
            json!({
                "title": { "stringValue": "Dune" },
                "rating": { "doubleValue": 4.8 },
            })
        );
    }

    #[test]
    fn document_id_is_last_path_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/books/AbC123"),
            "AbC123"
        );
        assert_eq!(document_id("AbC123"), "AbC123");
    }
}
