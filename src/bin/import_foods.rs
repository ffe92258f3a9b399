//! `import-foods <table.csv>`: register every food of a CSV table.

use std::fs::File;

use anyhow::Context;
use foodlog::{import, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "foodlog=info,sqlx=warn".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let path = std::env::args()
        .nth(1)
        .context("usage: import-foods <table.csv>")?;
    let file = File::open(&path).with_context(|| format!("cannot open {path}"))?;

    let state = AppState::init().await?;
    let report = import::import_csv(&state.db, file).await?;

    println!("{}", serde_json::to_string(&report)?);
    if report.imported == 0 && report.failed > 0 {
        anyhow::bail!("no food imported from {path}");
    }
    Ok(())
}
