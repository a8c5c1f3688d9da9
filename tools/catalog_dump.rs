use std::env;
use std::path::PathBuf;

use common::TracksResponse;
use library::{validate_root, Catalog, Traversal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut root = None;
    let mut traversal = Traversal::Recursive;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--flat" => traversal = Traversal::Flat,
            _ if root.is_none() => root = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {}", arg).into()),
        }
    }
    let root = root.ok_or("usage: catalog_dump <ROOT> [--flat]")?;
    validate_root(&root)?;

    let scan = Catalog::new(root, traversal).scan();
    tracing::info!(
        "{} tracks, {} skipped, {} walk errors",
        scan.stats.tracks,
        scan.stats.skipped,
        scan.stats.walk_errors
    );
    let response = TracksResponse::from(scan.tracks);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
