use anyhow::Result;
use catalog_client::views::{render_detail, render_list};
use catalog_client::{CatalogClient, DataLayer};
use catalog_core::NewItem;
use serde_json::json;

pub(crate) async fn run_items(url: &str, query: &str, page: usize) -> Result<()> {
    let layer = DataLayer::new(CatalogClient::new(url)?);
    // The error is kept in the state and rendered below.
    if let Err(e) = layer.fetch(page, query, None).await {
        tracing::debug!(error = %e, "list fetch failed");
    }
    let state = layer.snapshot();
    println!("{}", render_list(&state));
    if state.error.is_some() {
        anyhow::bail!("failed to list items");
    }
    Ok(())
}

pub(crate) async fn run_item(url: &str, id: &str) -> Result<()> {
    let client = CatalogClient::new(url)?;
    let item = client.get_item(id).await?;
    println!("{}", render_detail(&item));
    Ok(())
}

pub(crate) async fn run_stats(url: &str) -> Result<()> {
    let client = CatalogClient::new(url)?;
    let report = client.stats().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) async fn run_add(url: &str, name: String, category: String, price: f64) -> Result<()> {
    let new = NewItem::from_json(json!({"name": name, "category": category, "price": price}))?;
    let client = CatalogClient::new(url)?;
    let item = client.create_item(&new).await?;
    println!("{}", render_detail(&item));
    Ok(())
}
