use crate::error::TailError;
use crate::line_source::LineSource;
use crate::sink::Sink;
use log::{debug, error, warn};
use tokio::io::{AsyncRead, AsyncWrite};

/// Read, stamp and record lines until a fatal error occurs.
///
/// Decode, read and persistence faults are logged, shown on the console as
/// `ERR`, and the loop moves on to the next line. Any other error ends the
/// loop and is returned, including end of stream on the serial reader
/// (`TailError::Disconnected`), which is how an unplugged device can show up.
pub async fn run<R, W>(source: &mut LineSource<R>, sink: &mut Sink<W>) -> Result<(), TailError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let outcome = match source.next_line().await {
            Ok(Some(line)) => sink.emit(&line).await.map(|record| {
                debug!("Recorded line of {} bytes", record.text.len());
            }),
            Ok(None) => Err(TailError::Disconnected),
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            if !e.is_recoverable() {
                error!("Stopping: {}", e);
                return Err(e);
            }
            warn!("{}", e);
            sink.indicate_error().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_source::scripted::ScriptedReader;
    use crate::log_record::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use std::io;

    fn split_record(line: &str) -> (NaiveDateTime, &str) {
        let (stamp, text) = line.split_once("\t\t\t\t").expect("record separator");
        (NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).unwrap(), text)
    }

    #[tokio::test]
    async fn records_every_line_in_arrival_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let input: &[u8] = b"CHAIN_CONFIG.LOCAL_ADDRESS=1\nCHAIN_CONFIG.CHAIN_LENGTH=4\nrx_low=0\ntime_ms_now=1200\n";
        let mut source = LineSource::new(input);
        let mut sink = Sink::new(Vec::new(), &path);

        let err = run(&mut source, &mut sink).await.unwrap_err();
        assert!(matches!(err, TailError::Disconnected));

        let logged = std::fs::read_to_string(&path).unwrap();
        let records: Vec<_> = logged.lines().map(split_record).collect();
        let texts: Vec<_> = records.iter().map(|(_, text)| *text).collect();
        assert_eq!(
            texts,
            ["CHAIN_CONFIG.LOCAL_ADDRESS=1", "CHAIN_CONFIG.CHAIN_LENGTH=4", "rx_low=0", "time_ms_now=1200"]
        );
        assert!(records.windows(2).all(|pair| pair[0].0 <= pair[1].0));
        assert_eq!(String::from_utf8(sink.console().clone()).unwrap(), logged);
    }

    #[tokio::test]
    async fn malformed_line_between_good_lines_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let input: &[u8] = b"system_ready=0\n\xff\xfe\nsystem_ready=1\n";
        let mut source = LineSource::new(input);
        let mut sink = Sink::new(Vec::new(), &path);

        run(&mut source, &mut sink).await.unwrap_err();

        let logged = std::fs::read_to_string(&path).unwrap();
        let texts: Vec<_> = logged.lines().map(|line| split_record(line).1).collect();
        assert_eq!(texts, ["system_ready=0", "system_ready=1"]);

        let console = String::from_utf8(sink.console().clone()).unwrap();
        let console_lines: Vec<_> = console.lines().collect();
        assert_eq!(console_lines.len(), 3);
        assert_eq!(console_lines[1], "ERR");
        assert!(!logged.contains("ERR"));
    }

    #[tokio::test]
    async fn read_fault_shows_err_and_the_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut source = LineSource::new(ScriptedReader::new([
            Ok(&b"good=1\nrx_l"[..]),
            Err(io::ErrorKind::Other),
            Ok(&b"ow=0\ngood=2\n"[..]),
        ]));
        let mut sink = Sink::new(Vec::new(), &path);

        let err = run(&mut source, &mut sink).await.unwrap_err();
        assert!(matches!(err, TailError::Disconnected));

        let console = String::from_utf8(sink.console().clone()).unwrap();
        let console_lines: Vec<_> = console.lines().collect();
        assert_eq!(console_lines.len(), 3);
        assert_eq!(split_record(console_lines[0]).1, "good=1");
        assert_eq!(console_lines[1], "ERR");
        assert_eq!(split_record(console_lines[2]).1, "good=2");

        let logged = std::fs::read_to_string(&path).unwrap();
        let texts: Vec<_> = logged.lines().map(|line| split_record(line).1).collect();
        assert_eq!(texts, ["good=1", "good=2"]);
    }

    #[tokio::test]
    async fn persistence_failure_does_not_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let input: &[u8] = b"frame_blending_amount=10\nframe_blending_amount=20\n";
        let mut source = LineSource::new(input);
        // Appending to a directory always fails
        let mut sink = Sink::new(Vec::new(), dir.path());

        let err = run(&mut source, &mut sink).await.unwrap_err();
        assert!(matches!(err, TailError::Disconnected));

        let console = String::from_utf8(sink.console().clone()).unwrap();
        let console_lines: Vec<_> = console.lines().collect();
        assert_eq!(console_lines.len(), 4);
        assert_eq!(split_record(console_lines[0]).1, "frame_blending_amount=10");
        assert_eq!(console_lines[1], "ERR");
        assert_eq!(split_record(console_lines[2]).1, "frame_blending_amount=20");
        assert_eq!(console_lines[3], "ERR");
    }

    #[tokio::test]
    async fn later_cycles_never_rewrite_earlier_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");

        let mut sink = Sink::new(Vec::new(), &path);
        run(&mut LineSource::new(&b"debug_led_opacity=5\n"[..]), &mut sink)
            .await
            .unwrap_err();
        let first_session = std::fs::read_to_string(&path).unwrap();

        run(&mut LineSource::new(&b"debug_led_opacity=6\n"[..]), &mut sink)
            .await
            .unwrap_err();
        let second_session = std::fs::read_to_string(&path).unwrap();

        assert!(second_session.starts_with(&first_session));
        assert_eq!(second_session.lines().count(), 2);
    }

    #[tokio::test]
    async fn empty_stream_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let mut sink = Sink::new(Vec::new(), &path);

        let err = run(&mut LineSource::new(&b""[..]), &mut sink).await.unwrap_err();

        assert!(matches!(err, TailError::Disconnected));
        assert!(sink.console().is_empty());
        assert!(!path.exists());
    }
}
