pub const FILL_SPREAD_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FILL_SPREAD_NAME: &str = env!("CARGO_PKG_NAME");

/// Used when `-c` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "fill_spread.cfg";
