use anyhow::Context;
use std::env;
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::dpms::{self, ConnectionExt as DpmsConnectionExt, DPMSMode};
use x11rb::protocol::screensaver::{self, ConnectionExt as ScreensaverConnectionExt};
use x11rb::protocol::xproto::Window;
use x11rb::rust_connection::RustConnection;

use super::dpms::{DpmsStatus, DpmsTimeouts, PowerLevel};
use crate::{config::defaults, IdleError};

/// The process' only connection to the X server. Closed when dropped.
pub struct X11Client {
    connection: RustConnection,
    screen_root: Window,
}

impl X11Client {
    pub fn new(display: Option<&str>) -> Result<Self, IdleError> {
        let display = match display {
            Some(display) => display.to_string(),
            None => env::var("DISPLAY").unwrap_or_else(|_| {
                let display = defaults::display();
                warn!("DISPLAY is not set, using the default value \"{display}\"");
                display
            }),
        };

        debug!("Connecting to X11 display \"{display}\"");
        let (connection, screen_num) =
            x11rb::connect(Some(&display)).map_err(IdleError::Connection)?;
        let screen_root = connection.setup().roots[screen_num].root;

        Ok(X11Client {
            connection,
            screen_root,
        })
    }

    pub fn has_screensaver(&self) -> Result<bool, IdleError> {
        let extension = self
            .connection
            .extension_information(screensaver::X11_EXTENSION_NAME)
            .map_err(|e| IdleError::QueryFailure(e.into()))?;

        Ok(extension.is_some())
    }

    /// Raw value of the screensaver idle counter.
    pub fn millis_since_last_input(&self) -> Result<u32, IdleError> {
        let reply = self
            .connection
            .screensaver_query_info(self.screen_root)
            .map_err(|e| IdleError::QueryFailure(e.into()))?
            .reply()
            .map_err(IdleError::QueryFailure)?;

        Ok(reply.ms_since_user_input)
    }

    /// DPMS state if the server supports it and has it enabled. Failures only disable the correction.
    pub fn dpms_status(&self) -> Option<DpmsStatus> {
        match self.query_dpms() {
            Ok(status) => status,
            Err(e) => {
                debug!("DPMS state is unavailable: {e:#}");
                None
            }
        }
    }

    fn query_dpms(&self) -> anyhow::Result<Option<DpmsStatus>> {
        if self
            .connection
            .extension_information(dpms::X11_EXTENSION_NAME)?
            .is_none()
        {
            trace!("DPMS extension is not present");
            return Ok(None);
        }

        let capable = self
            .connection
            .dpms_capable()
            .with_context(|| "DPMSCapable request failed")?
            .reply()
            .with_context(|| "DPMSCapable reply failed")?;
        if !capable.capable {
            trace!("Display is not DPMS capable");
            return Ok(None);
        }

        let timeouts = self
            .connection
            .dpms_get_timeouts()
            .with_context(|| "DPMSGetTimeouts request failed")?
            .reply()
            .with_context(|| "DPMSGetTimeouts reply failed")?;
        let info = self
            .connection
            .dpms_info()
            .with_context(|| "DPMSInfo request failed")?
            .reply()
            .with_context(|| "DPMSInfo reply failed")?;
        if !info.state {
            trace!("DPMS is disabled");
            return Ok(None);
        }

        let level = match info.power_level {
            DPMSMode::ON => PowerLevel::On,
            DPMSMode::STANDBY => PowerLevel::Standby,
            DPMSMode::SUSPEND => PowerLevel::Suspend,
            DPMSMode::OFF => PowerLevel::Off,
            unknown => {
                debug!("Unknown DPMS power level {}", u16::from(unknown));
                return Ok(None);
            }
        };

        Ok(Some(DpmsStatus {
            level,
            timeouts: DpmsTimeouts {
                standby: timeouts.standby_timeout,
                suspend: timeouts.suspend_timeout,
                off: timeouts.off_timeout,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unparsable_display_is_a_connection_error() {
        let client = X11Client::new(Some("not-a-display"));

        assert!(matches!(client, Err(IdleError::Connection(_))));
    }
}
