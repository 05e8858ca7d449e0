use crate::error::TailError;
use crate::log_record::LogRecord;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Console marker shown in place of a record when a cycle fails.
pub const ERROR_INDICATOR: &str = "ERR";

/// Writes each record to the console and appends it to the log file.
pub struct Sink<W> {
    console: W,
    log_path: PathBuf,
}

impl<W: AsyncWrite + Unpin> Sink<W> {
    pub fn new(console: W, log_path: impl Into<PathBuf>) -> Self {
        Self {
            console,
            log_path: log_path.into(),
        }
    }

    #[cfg(test)]
    pub fn console(&self) -> &W {
        &self.console
    }

    /// Stamp `text` with the current local time and record it.
    pub async fn emit(&mut self, text: &str) -> Result<LogRecord, TailError> {
        let record = LogRecord::now(text);
        self.emit_record(&record).await?;
        Ok(record)
    }

    /// Console first, then the log file. The file is opened and closed
    /// within this call.
    pub async fn emit_record(&mut self, record: &LogRecord) -> Result<(), TailError> {
        let line = record.render();

        self.write_console(line.as_bytes()).await?;
        self.append(line.as_bytes()).await
    }

    /// Console-only fault marker. The log file is never touched.
    pub async fn indicate_error(&mut self) -> Result<(), TailError> {
        self.write_console(format!("{}\n", ERROR_INDICATOR).as_bytes())
            .await
    }

    async fn write_console(&mut self, bytes: &[u8]) -> Result<(), TailError> {
        self.console.write_all(bytes).await.map_err(TailError::Console)?;
        self.console.flush().await.map_err(TailError::Console)
    }

    async fn append(&self, bytes: &[u8]) -> Result<(), TailError> {
        let persistence = |source: std::io::Error| TailError::Persistence {
            path: self.log_path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(persistence)?;

        file.write_all(bytes).await.map_err(persistence)?;
        // tokio's File completes writes in the background until flushed
        file.flush().await.map_err(persistence)
    }
}
