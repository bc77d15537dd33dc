use std::path::PathBuf;

/// Run configuration. There is no CLI surface; the defaults below are the
/// whole configuration of a normal run, and tests substitute their own
/// paths and collection names.
#[derive(Debug, Clone)]
pub struct Config {
    /// Workbook holding the book rows.
    pub spreadsheet_path: PathBuf,
    /// Service-account key file for the document store.
    pub credentials_path: PathBuf,
    /// Destination collection name.
    pub collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_path: PathBuf::from("bookall.xlsx"),
            credentials_path: PathBuf::from("firebase-key.json"),
            collection: "books".to_string(),
        }
    }
}
