use tracing::debug;

use super::{SheetError, Table, AUTHOR_COLUMN};

/// Column name the source workbooks are expected to use for the author.
const SOURCE_AUTHOR_COLUMN: &str = "author";

/// Rename the lowercase `author` column to its canonical `Author` form,
/// leaving the rest of the table untouched.
///
/// The match is exact: a workbook that only carries `Author` or `AUTHOR`
/// is rejected with [`SheetError::MissingColumn`]. The source files always
/// spell the column in lowercase, and the upload step reads the renamed
/// column under exactly the canonical key, so no fuzzy matching is done
/// here.
pub fn ensure_author_column(table: &mut Table) -> Result<(), SheetError> {
    if !table.rename_column(SOURCE_AUTHOR_COLUMN, AUTHOR_COLUMN) {
        return Err(SheetError::MissingColumn {
            column: AUTHOR_COLUMN,
            present: table.columns().to_vec(),
        });
    }
    debug!(columns = ?table.columns(), "renamed author column");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renames_author_and_keeps_values() {
        let mut table = Table::new(
            vec!["title".into(), "rating".into(), "author".into()],
            vec![vec![json!("Dune"), json!(4.8), json!("Herbert")]],
        );
        ensure_author_column(&mut table).unwrap();

        assert_eq!(table.columns(), ["title", "rating", "Author"]);
        assert!(!table.has_column("author"));
        assert_eq!(table.value(0, AUTHOR_COLUMN), &json!("Herbert"));
        assert_eq!(table.value(0, "title"), &json!("Dune"));
    }

    #[test]
    fn fails_when_author_column_is_absent() {
        let mut table = Table::new(
            vec!["title".into(), "rating".into()],
            vec![vec![json!("Dune"), json!(4.8)]],
        );
        let err = ensure_author_column(&mut table).unwrap_err();
        assert!(matches!(
            err,
            SheetError::MissingColumn { column: "Author", .. }
        ));
    }

    #[test]
    fn already_canonical_casing_is_still_rejected() {
        // The check looks for lowercase `author` only; a pre-cased column
        // does not satisfy it.
        let mut table = Table::new(
            vec!["title".into(), "rating".into(), "Author".into()],
            vec![vec![json!("Dune"), json!(4.8), json!("Herbert")]],
        );
        assert!(ensure_author_column(&mut table).is_err());

        let mut upper = Table::new(
            vec!["title".into(), "rating".into(), "AUTHOR".into()],
            vec![vec![json!("Dune"), json!(4.8), json!("Herbert")]],
        );
        assert!(ensure_author_column(&mut upper).is_err());
    }
}
