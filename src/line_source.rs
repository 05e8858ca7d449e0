use crate::error::TailError;
use log::{debug, info, trace};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Pulls newline-terminated text lines from a byte stream.
pub struct LineSource<R> {
    reader: BufReader<R>,
    line_buffer: Vec<u8>,
    /// Set when a read error cut a line short; the remainder is dropped.
    resync: bool,
}

impl LineSource<SerialStream> {
    /// Open the serial device. Failure here is fatal to the caller.
    pub fn open(port: &str, baud_rate: u32) -> Result<Self, TailError> {
        let stream = tokio_serial::new(port, baud_rate)
            .open_native_async()
            .map_err(|source| TailError::Connection {
                port: port.to_string(),
                source,
            })?;

        info!("Connected to serial port {} at {} baud", port, baud_rate);
        Ok(Self::new(stream))
    }
}

impl<R: AsyncRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_buffer: Vec::new(),
            resync: false,
        }
    }

    /// Wait for the next line and return it decoded and trimmed.
    ///
    /// Blocks with no timeout. Returns `Ok(None)` once the stream has ended.
    /// The offending bytes of an undecodable line are consumed, so the
    /// following call starts on the next line. Likewise a read error in the
    /// middle of a line discards the rest of that line rather than returning
    /// its tail as a line of its own.
    pub async fn next_line(&mut self) -> Result<Option<String>, TailError> {
        if self.resync {
            self.line_buffer.clear();
            let skipped = self
                .reader
                .read_until(b'\n', &mut self.line_buffer)
                .await
                .map_err(TailError::Read)?;
            if skipped == 0 {
                return Ok(None);
            }
            self.resync = false;
            debug!("Discarded {} bytes of a line cut short by a read error", skipped);
        }

        self.line_buffer.clear();

        let read = match self.reader.read_until(b'\n', &mut self.line_buffer).await {
            Ok(read) => read,
            Err(e) => {
                self.resync = !self.line_buffer.is_empty();
                return Err(TailError::Read(e));
            }
        };

        if read == 0 {
            return Ok(None);
        }

        let text = std::str::from_utf8(&self.line_buffer).map_err(|source| TailError::Decode {
            len: read,
            source,
        })?;

        let line = text.trim().to_string();
        trace!("Received line: {}", line);
        Ok(Some(line))
    }
}
