use thiserror::Error;
use x11rb::errors::{ConnectError, ReplyError};

#[derive(Debug, Error)]
pub enum IdleError {
    #[error("couldn't open display: {0}")]
    Connection(#[source] ConnectError),
    #[error("screen saver extension not supported")]
    ExtensionUnavailable,
    #[error("couldn't query screen saver info: {0}")]
    QueryFailure(#[source] ReplyError),
    #[error("couldn't write idle time: {0}")]
    Output(#[from] std::io::Error),
}
