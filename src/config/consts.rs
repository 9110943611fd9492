use std::time::Duration;

/// Default staleness window for a cached league snapshot (minutes)
pub const DEFAULT_TTL_MINUTES: u64 = 30;
/// Default staleness window for the cached current week (minutes)
pub const DEFAULT_WEEK_TTL_MINUTES: u64 = 5;
/// Longest accepted staleness window for either cache (one week, minutes)
pub const MAX_TTL_MINUTES: u64 = 7 * 24 * 60;
/// Default pause between chat reads (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// LogWriter flush cadence
pub const LOG_FLUSH_INTERVAL: Duration = Duration::from_secs(1);
/// Upper bound on a single log flush before the batch is dropped
pub const LOG_WRITE_TIMEOUT: Duration = Duration::from_secs(10);
/// FetchWorker pause between empty-queue checks
pub const FETCH_IDLE_INTERVAL: Duration = Duration::from_secs(1);

/// Values shipped in the sample configuration; startup rejects them
pub const PLACEHOLDER_API_TOKEN: &str = "changeme";
pub const PLACEHOLDER_LEAGUE_ID: u64 = 12345;
pub const PLACEHOLDER_LEAGUE_YEAR: u16 = 12345;

/// Chat platform's own system user; never dispatched
pub const SYSTEM_USER_ID: &str = "USLACKBOT";

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_FIXTURE_DIR: &str = "dat/league";

pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const SHUTDOWN_PHASE_TIMEOUT: Duration = Duration::from_secs(15);

pub const CONSOLE_CHANNEL_ID: &str = "C0CONSOLE";
pub const CONSOLE_USER_ID: &str = "U0CONSOLE";
