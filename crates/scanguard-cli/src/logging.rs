//! Log setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise warnings (each rejection logs one),
/// or debug output from the scanguard crates with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,scanguard=debug,scanguard_net=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
