pub mod defaults;

use std::time::Duration;

/// When the poller stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Poll until the process is asked to terminate.
    Unbounded,
    /// Query once without waiting and print the value.
    PrintOnce,
    /// Poll until the idle time reaches this many milliseconds.
    Millis(u64),
}

impl Target {
    /// `0` is the command line spelling of "no target".
    pub fn from_millis(millis: u64) -> Self {
        if millis == 0 {
            Target::Unbounded
        } else {
            Target::Millis(millis)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub interval: Duration,
    pub verbose: bool,
    pub quiet: bool,
    pub display: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::Unbounded,
            interval: Duration::from_millis(defaults::interval_millis()),
            verbose: false,
            quiet: false,
            display: None,
        }
    }
}
