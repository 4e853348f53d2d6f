use env_logger::{Builder, Env};

/// Initialises diagnostic logging on stderr.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or
/// debug output (every external tool invocation) when `verbose` is set.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    // try_init: tests may initialise twice in one process
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .format_module_path(true)
        .try_init();
}
