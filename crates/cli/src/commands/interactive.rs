use std::time::Instant;

use anyhow::Result;
use catalog_client::views::render_list;
use catalog_client::{CatalogClient, ClientError, DataLayer, SearchDebouncer};
use catalog_core::{Item, Page};
use tokio::io::{AsyncBufReadExt, BufReader};

pub(crate) async fn run(url: &str) -> Result<()> {
    let layer = DataLayer::new(CatalogClient::new(url)?);
    let mut debouncer = SearchDebouncer::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    show(&layer, layer.fetch(1, "", None).await);

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let current = layer.pagination().current_page;
                match line.trim() {
                    ":q" => break,
                    ":n" => show(&layer, layer.change_page(current + 1).await),
                    ":p" => show(&layer, layer.change_page(current.saturating_sub(1)).await),
                    text => debouncer.input(text, Instant::now()),
                }
            },
            () = sleep_until(deadline) => {
                if let Some(query) = debouncer.tick(Instant::now()) {
                    show(&layer, layer.search(&query).await);
                }
            },
        }
    }
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

fn show(layer: &DataLayer, result: Result<Page<Item>, ClientError>) {
    match result {
        Err(e @ ClientError::PageOutOfRange { .. }) => println!("{e}"),
        Err(e) if e.is_cancelled() => {},
        _ => println!("{}\n", render_list(&layer.snapshot())),
    }
}
