#[macro_use]
extern crate log;

pub mod config;
mod error;
mod poller;
mod sources;

pub use error::IdleError;
pub use poller::{PollOutcome, Poller};
pub use sources::dpms::{compensate, DpmsStatus, DpmsTimeouts, PowerLevel};
pub use sources::x11_connection::X11Client;
pub use sources::x11_screensaver_idle::ScreensaverIdle;
pub use sources::IdleSource;
