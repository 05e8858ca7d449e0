use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TailError {
    #[error("Failed to open serial port {port}: {source}")]
    Connection {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("Received {len} bytes that are not valid UTF-8: {source}")]
    Decode {
        len: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("Serial read error: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to append to log file {path:?}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write error: {0}")]
    Console(#[source] std::io::Error),

    #[error("Serial stream closed")]
    Disconnected,
}

impl TailError {
    /// Faults the driver loop absorbs. Anything else ends the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TailError::Decode { .. } | TailError::Read(_) | TailError::Persistence { .. }
        )
    }
}
