use async_trait::async_trait;

use super::{dpms, x11_connection::X11Client, IdleSource};
use crate::IdleError;

/// Idle time from the MIT-SCREEN-SAVER extension with the DPMS correction applied.
pub struct ScreensaverIdle {
    client: X11Client,
}

impl ScreensaverIdle {
    pub fn new(client: X11Client) -> Result<Self, IdleError> {
        if !client.has_screensaver()? {
            return Err(IdleError::ExtensionUnavailable);
        }
        debug!("Screensaver extension is available");

        Ok(ScreensaverIdle { client })
    }
}

#[async_trait]
impl IdleSource for ScreensaverIdle {
    async fn millis_since_input(&mut self) -> Result<u64, IdleError> {
        let raw = u64::from(self.client.millis_since_last_input()?);
        let status = self.client.dpms_status();
        trace!("Raw idle time {raw}ms, DPMS {status:?}");

        Ok(dpms::compensate(raw, status.as_ref()))
    }
}
