pub mod dpms;
pub mod x11_connection;
pub mod x11_screensaver_idle;

use crate::IdleError;
use async_trait::async_trait;

#[async_trait]
pub trait IdleSource: Send {
    /// Milliseconds since the last user input, corrected for the power state of the display.
    async fn millis_since_input(&mut self) -> Result<u64, IdleError>;
}
