//! Kinetic impactor orbit calculator.
//!
//! Estimates how a spacecraft impact changes an asteroid's heliocentric orbit. The numerical
//! work lives in the member crates; this library re-exports them so the binaries (and any
//! other front-end) share one entry point.

pub use impactor_config as config;
pub use impactor_core::{angles, constants, time, units, vector};
pub use impactor_engine as engine;
pub use impactor_export as export;
pub use impactor_importer as importer;
pub use impactor_impulsive as impulsive;
pub use impactor_orbits as orbits;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Install the stderr log subscriber used by the binaries (`RUST_LOG`, default `warn`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
