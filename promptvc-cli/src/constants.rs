/// Application name, used for the confy configuration file.
pub const PROMPTVC_CLI: &str = "promptvc";

/// Overrides the configured data directory when set.
pub const DATA_DIR_ENV: &str = "PROMPTVC_DATA_DIR";

/// Data directory below `$HOME` when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".prompt-manager";

/// Exit code for any user-facing failure.
pub const USER_ERROR: i32 = 1;

pub const DEFAULT_LOG_FILTER: &str = "promptvc=warn,promptvc_core=warn";
