//! CLI subcommand implementations for the `prd-validator` binary.

pub mod doctor;
pub mod output;
pub mod serve_cmd;
pub mod validate_cmd;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at `info`, or at
/// `debug` when `verbose` is set.
pub fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose {
        "prd_validator=debug,prd_validator_runtime=debug"
    } else {
        "prd_validator=info,prd_validator_runtime=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("  Warning: logging not initialized: {e}");
    }
}
