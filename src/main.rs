use anyhow::Result;
use bookloader::{
    config::Config,
    sheet::{ensure_author_column, load_workbook},
    store::FirestoreClient,
    upload::upload_books,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let cfg = Config::default();

    // ─── 2) load the workbook ────────────────────────────────────────
    let mut table = load_workbook(&cfg.spreadsheet_path)?;
    info!(columns = ?table.columns(), rows = table.len(), "loaded spreadsheet");

    // ─── 3) normalize the author column ──────────────────────────────
    ensure_author_column(&mut table)?;
    info!(columns = ?table.columns(), "columns after rename");

    // ─── 4) upload one document per row ──────────────────────────────
    let store = FirestoreClient::new(&cfg.credentials_path).await?;
    let outcomes = upload_books(&store, &cfg.collection, &table).await;

    let created = outcomes.iter().filter(|o| o.is_created()).count();
    info!(
        created,
        failed = outcomes.len() - created,
        "book upload finished"
    );
    Ok(())
}
