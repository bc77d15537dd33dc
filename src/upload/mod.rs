use serde_json::{Map, Value};
use tracing::{error, info};

use crate::sheet::{Table, AUTHOR_COLUMN};
use crate::store::DocumentStore;

/// Outcome of one row's create-document call, in row order.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Created { title: String, doc_id: String },
    Failed { title: String, error: String },
}

impl RowOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, RowOutcome::Created { .. })
    }

    pub fn title(&self) -> &str {
        match self {
            RowOutcome::Created { title, .. } | RowOutcome::Failed { title, .. } => title,
        }
    }
}

/// Create one document per table row in `collection`.
///
/// Rows are sent in file order, one call at a time; each call finishes
/// before the next row starts. A failed call is logged with the row's
/// title and recorded in the returned outcomes, and the remaining rows are
/// still attempted. Nothing is retried and nothing is deduplicated, so
/// running this twice over the same table doubles the collection.
pub async fn upload_books<S: DocumentStore>(
    store: &S,
    collection: &str,
    table: &Table,
) -> Vec<RowOutcome> {
    let mut outcomes = Vec::with_capacity(table.len());

    for row in 0..table.len() {
        let title = display_text(table.value(row, "title"));
        let fields = book_fields(table, row);

        match store.create_document(collection, &fields).await {
            Ok(doc_id) => {
                info!(title = %title, doc_id = %doc_id, "uploaded book");
                outcomes.push(RowOutcome::Created { title, doc_id });
            }
            Err(err) => {
                error!(title = %title, error = %err, "failed to upload book");
                outcomes.push(RowOutcome::Failed {
                    title,
                    error: err.to_string(),
                });
            }
        }
    }

    outcomes
}

/// The three fields a book document carries. The author value is read from
/// the normalized `Author` column but stored under lowercase `author`.
fn book_fields(table: &Table, row: usize) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("title".to_string(), table.value(row, "title").clone());
    fields.insert("rating".to_string(), table.value(row, "rating").clone());
    fields.insert("author".to_string(), table.value(row, AUTHOR_COLUMN).clone());
    fields
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
