use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kinetic_impactor::config::{AsteroidLookup, Catalog, Chain, EngineConfig, load_engine_config};
use kinetic_impactor::engine::{
    ApplicationPoint, ChangeEntry, DeltaVSpec, Failure, ImpactResult, ImpulseDirection,
    KineticImpactor, compute_impact_result, scenario_from_lookup,
};
use kinetic_impactor::export::{self, report, trajectory};
use kinetic_impactor::importer::neows::DEMO_API_KEY;
use kinetic_impactor::importer::{NeoCache, NeoWsClient};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Estimate how a kinetic impactor changes an asteroid's orbit"
)]
struct Cli {
    /// Asteroid SPK-ID, name, or alias
    #[arg(long)]
    asteroid: String,

    /// Asteroid catalog (YAML list, TOML record, or directory of TOML records)
    #[arg(long, default_value = "data/asteroids.yaml")]
    catalog: PathBuf,

    /// Directory of cached NeoWs responses
    #[arg(long, default_value = "data/neo")]
    neo_cache: PathBuf,

    /// Query NASA NeoWs when the asteroid is not available locally
    #[arg(long, default_value_t = false)]
    online: bool,

    /// NeoWs API key (falls back to $NASA_API_KEY, then DEMO_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Engine settings file (TOML or YAML)
    #[arg(long)]
    engine_config: Option<PathBuf>,

    /// Asteroid bulk density in kg/m³ (defaults to catalog, then engine default)
    #[arg(long)]
    density: Option<f64>,

    /// Explicit delta-v vector in km/s, e.g. `--delta-v 0.001,0,0`; overrides the impactor model
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    delta_v: Option<Vec<f64>>,

    /// Impactor push direction relative to the asteroid's motion
    #[arg(long, value_enum, default_value_t = Direction::Along)]
    direction: Direction,

    /// Spacecraft mass in kg
    #[arg(long, default_value_t = 570.0)]
    craft_mass: f64,

    /// Relative impact speed in m/s
    #[arg(long, default_value_t = 6_140.0)]
    craft_velocity: f64,

    /// Momentum enhancement factor
    #[arg(long, default_value_t = 3.6)]
    beta: f64,

    /// Orbit location where the impulse is applied
    #[arg(long, value_enum, default_value_t = Point::Epoch)]
    at: Point,

    /// JSON report destination (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Optional trajectory CSV destination for `orbit_plot`
    #[arg(long)]
    trajectory: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Direction {
    Along,
    Against,
    Radial,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Point {
    Epoch,
    Periapsis,
    Apoapsis,
}

fn main() -> anyhow::Result<()> {
    kinetic_impactor::init_tracing();
    let cli = Cli::parse();

    let engine_config = match &cli.engine_config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };

    let catalog = if cli.catalog.exists() {
        Catalog::load(&cli.catalog)?
    } else {
        Catalog::default()
    };
    if catalog.is_empty() {
        tracing::warn!(path = %cli.catalog.display(), "asteroid catalog missing or empty; using NeoWs records only");
    }
    let cache = NeoCache::new(&cli.neo_cache);
    let client = if cli.online {
        let key = cli
            .api_key
            .clone()
            .or_else(|| std::env::var("NASA_API_KEY").ok())
            .unwrap_or_else(|| DEMO_API_KEY.to_string());
        Some(NeoWsClient::new(key)?)
    } else {
        None
    };
    let mut lookup = Chain::new()
        .with(&catalog as &dyn AsteroidLookup)
        .with(&cache as &dyn AsteroidLookup);
    if let Some(client) = &client {
        lookup = lookup.with(client as &dyn AsteroidLookup);
    }

    let delta_v = match &cli.delta_v {
        Some(components) => {
            let [x, y, z] = components.as_slice() else {
                anyhow::bail!("--delta-v expects exactly three comma-separated components");
            };
            DeltaVSpec::Explicit {
                delta_v_km_s: [*x, *y, *z],
            }
        }
        None => DeltaVSpec::Kinetic {
            impactor: KineticImpactor {
                mass_kg: cli.craft_mass,
                velocity_m_s: cli.craft_velocity,
                beta: cli.beta,
            },
            direction: match cli.direction {
                Direction::Along => ImpulseDirection::Along,
                Direction::Against => ImpulseDirection::Against,
                Direction::Radial => ImpulseDirection::Radial,
            },
        },
    };
    let application_point = match cli.at {
        Point::Epoch => ApplicationPoint::Epoch,
        Point::Periapsis => ApplicationPoint::Periapsis,
        Point::Apoapsis => ApplicationPoint::Apoapsis,
    };

    let mut writer = export::writer_for_path(&cli.output)?;
    let outcome = scenario_from_lookup(
        &lookup,
        &cli.asteroid,
        cli.density,
        engine_config.default_density_kg_m3,
        delta_v,
        application_point,
    )
    .and_then(|scenario| compute_impact_result(&scenario, &engine_config));

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            report::write_failure(&mut writer, &Failure::from(&err))?;
            writer.flush()?;
            return Err(err.into());
        }
    };

    report::write_report(&mut writer, &result, chrono::Utc::now())?;
    writer.flush()?;

    if let Some(path) = &cli.trajectory {
        let mut csv = export::writer_for_path(path)?;
        trajectory::write_plot(&mut csv, &result.plot)?;
    }

    if cli.output != PathBuf::from("-") {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &ImpactResult) {
    println!("=== Impact Summary: {} ===", result.asteroid_name);
    println!(
        "Asteroid        : d = {:.1} m, M = {:.3e} kg",
        result.diameter_m, result.mass_kg
    );
    println!(
        "Delta-v         : [{:.6}, {:.6}, {:.6}] m/s (|Δv| = {:.6} m/s, cost = {:.3e} km/s)",
        result.delta_v_m_s[0],
        result.delta_v_m_s[1],
        result.delta_v_m_s[2],
        result.delta_v_magnitude_m_s,
        result.maneuver_cost_km_s
    );
    for (key, entry) in result.orbital_changes.iter() {
        match entry {
            ChangeEntry::Defined(change) => println!(
                "{:<16}: {:.9} -> {:.9} {} (Δ = {:+.3e}, {})",
                key.as_str(),
                change.original,
                change.final_value,
                key.unit(),
                change.change,
                change
                    .percent_change
                    .map(|p| format!("{p:+.6}%"))
                    .unwrap_or_else(|| "n/a".to_string())
            ),
            ChangeEntry::Undefined { original } => println!(
                "{:<16}: {:.9} {} -> undefined (open trajectory)",
                key.as_str(),
                original,
                key.unit()
            ),
        }
    }
}
