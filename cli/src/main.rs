//! A3S Pod CLI entry point.

use a3s_pod_core::{PodConfig, PodError, StateStore};
use tracing_subscriber::EnvFilter;

use a3s_pod_cli::commands;
use a3s_pod_cli::registry::exit_code;

fn main() {
    let config = match PodConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = commands::registry();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((name, rest)) = args.split_first() else {
        // Nowhere left to report a failed write to stderr.
        registry.write_overview(&mut std::io::stderr()).ok();
        std::process::exit(2);
    };

    let store = match StateStore::load(&config.root) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = registry.run(name, rest, &store) {
        eprintln!("Error: {e}");
        if matches!(e, PodError::UnknownCommand(_)) {
            registry.write_overview(&mut std::io::stderr()).ok();
        }
        std::process::exit(exit_code(&e));
    }
}
