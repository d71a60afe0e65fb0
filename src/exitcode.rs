//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (unknown command or flag)
pub const USAGE: i32 = 64;

/// Data format error (tool output did not decode)
pub const DATAERR: i32 = 65;

/// Service unavailable (external tool missing or failed)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (command tree misconfigured)
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
