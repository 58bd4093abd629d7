//! Utility binary to download NeoWs asteroid records into `data/neo/`.
//!
//! Cached records let `impact` resolve asteroids offline. Records already on disk are left
//! untouched; delete the file to refresh it.

use std::path::PathBuf;

use clap::Parser;
use kinetic_impactor::config::AsteroidLookup;
use kinetic_impactor::importer::neows::DEMO_API_KEY;
use kinetic_impactor::importer::{LOCAL_NEO_DIR, NeoCache, NeoWsClient};

#[derive(Parser)]
#[command(author, version, about = "Cache NASA NeoWs asteroid records locally")]
struct Cli {
    /// SPK-IDs to fetch (e.g. 2099942 for Apophis)
    #[arg(required = true)]
    ids: Vec<String>,

    /// NeoWs API key (falls back to $NASA_API_KEY, then DEMO_KEY)
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, default_value = LOCAL_NEO_DIR)]
    cache_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    kinetic_impactor::init_tracing();
    let cli = Cli::parse();
    let key = cli
        .api_key
        .or_else(|| std::env::var("NASA_API_KEY").ok())
        .unwrap_or_else(|| DEMO_API_KEY.to_string());
    let client = NeoWsClient::new(key)?;
    let cache = NeoCache::new(&cli.cache_dir);

    for id in &cli.ids {
        let dest = match cache.path_for(id) {
            Ok(dest) => dest,
            Err(err) => {
                eprintln!("[error] {id}: {err}");
                continue;
            }
        };
        if dest.exists() {
            println!("[skip] {id} already present at {}", dest.display());
            continue;
        }

        println!("[download] {id} -> {}", dest.display());
        match client.fetch_raw(id).and_then(|body| cache.store(id, &body)) {
            Ok(_) => println!("[ok] {id}"),
            Err(err) => eprintln!("[error] {id}: {err}"),
        }
    }

    println!("\nCached records in {}:", cache.dir().display());
    for id in &cli.ids {
        match cache.lookup(id) {
            Ok(record) => println!(
                "  - {:<10} {:<32} a = {:.6} AU, e = {:.6}, i = {:.3}°, d = {:.0}-{:.0} m",
                record.id,
                record.name,
                record.orbit.semi_major_axis_au,
                record.orbit.eccentricity,
                record.orbit.inclination_deg,
                record.diameter_min_m,
                record.diameter_max_m
            ),
            Err(err) => eprintln!("[warn] {id}: {err}"),
        }
    }

    Ok(())
}
