//! Driver configuration.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use behavior_tree::TreeConfig;

/// Settings shared by every demo scenario.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Delay between two ticks of the driver loop.
    pub tick_interval: Duration,
    /// Ticks allowed for one run before the driver gives up.
    pub max_ticks: u64,
    /// Structural limits of the arenas built by the scenarios.
    pub tree: TreeConfig,
    /// Directory for the log file. Stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl DemoConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BT_TICK_INTERVAL_MS` - Tick interval in milliseconds (default: 50)
    /// - `BT_MAX_TICKS` - Tick budget per run (default: 100)
    /// - `BT_MAX_CHILDREN` - Child capacity of non-parallel nodes (default: 8)
    /// - `BT_PARALLEL_WIDTH` - Child capacity of parallel nodes (default: 32)
    /// - `BT_LOG_DIR` - Also write logs to `<dir>/bt-demo.log`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("BT_TICK_INTERVAL_MS") {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(ticks) = read_env::<u64>("BT_MAX_TICKS") {
            config.max_ticks = ticks.max(1);
        }
        if let Some(max) = read_env::<usize>("BT_MAX_CHILDREN") {
            config.tree = config.tree.with_max_children(max);
        }
        if let Some(width) = read_env::<usize>("BT_PARALLEL_WIDTH") {
            config.tree = config.tree.with_parallel_width(width);
        }
        if let Some(dir) = env::var_os("BT_LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            max_ticks: 100,
            tree: TreeConfig::default(),
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
