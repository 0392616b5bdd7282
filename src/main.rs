//! feltmap - upload a CSV file to a new Felt map.
//!
//! Usage: `feltmap <csv-path> [title]`

use feltmap::{Config, Error, MapClient, Result, Table};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feltmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let csv_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::invalid_input("usage: feltmap <csv-path> [title]"))?;
    let title = args.next().unwrap_or_else(|| {
        csv_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled map".to_string())
    });

    // Load configuration
    let config = Config::load_or_default()?;
    let token = config.api.resolve_token()?;

    let table = Table::from_csv_path(&csv_path)?;
    let mut client = MapClient::builder().config(config).token(token).build()?;

    let map_url = client.create_map(&title).await?.map_url.clone();
    let layer_id = client.add_layer(&table).await?;

    println!("Map:   {}", map_url);
    println!("Layer: {}", layer_id);
    println!("{}", client.show()?);

    Ok(())
}
