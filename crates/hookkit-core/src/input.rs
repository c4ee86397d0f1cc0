use parking_lot::Mutex;
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How long a hook waits for the host to finish piping its payload.
pub const DEFAULT_STDIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Read the hook payload from stdin.
///
/// Returns an empty string immediately when stdin is a terminal. Otherwise
/// waits up to `timeout` for EOF and returns whatever arrived by then.
pub async fn read_stdin(timeout: Duration) -> String {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        debug!("stdin is a terminal, no payload");
        return String::new();
    }
    read_with_timeout(stdin, timeout).await
}

/// Drain `reader` on a dedicated thread, returning the bytes collected
/// before EOF or before `timeout` elapses, whichever comes first.
///
/// The reader thread is detached: a read that never returns does not keep
/// the caller (or process exit) waiting.
pub async fn read_with_timeout<R>(reader: R, timeout: Duration) -> String
where
    R: Read + Send + 'static,
{
    let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    let shared = Arc::clone(&buffer);
    std::thread::spawn(move || {
        let mut reader = reader;
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => shared.lock().extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
        let _ = done_tx.send(());
    });

    if tokio::time::timeout(timeout, done_rx).await.is_err() {
        debug!(
            timeout_ms = timeout.as_millis() as u64,
            "stdin not closed in time, using partial input"
        );
    }

    let bytes = buffer.lock().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Yields one chunk, then blocks far longer than any test timeout.
    struct StallingReader {
        sent: bool,
    }

    impl Read for StallingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.sent {
                self.sent = true;
                let data = b"{\"prompt\":";
                buf[..data.len()].copy_from_slice(data);
                return Ok(data.len());
            }
            std::thread::sleep(Duration::from_secs(30));
            Ok(0)
        }
    }

    #[tokio::test]
    async fn reads_until_eof() {
        let input = Cursor::new(b"{\"prompt\": \"hello\"}".to_vec());
        let text = read_with_timeout(input, Duration::from_secs(2)).await;
        assert_eq!(text, "{\"prompt\": \"hello\"}");
    }

    #[tokio::test]
    async fn empty_reader_yields_empty_string() {
        let text = read_with_timeout(Cursor::new(Vec::new()), Duration::from_secs(2)).await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn timeout_returns_partial_input() {
        let started = std::time::Instant::now();
        let text =
            read_with_timeout(StallingReader { sent: false }, Duration::from_millis(50)).await;
        assert_eq!(text, "{\"prompt\":");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn multibyte_text_survives_chunking() {
        let prompt = "请帮我重构这个模块".repeat(1000);
        let input = Cursor::new(prompt.clone().into_bytes());
        let text = read_with_timeout(input, Duration::from_secs(2)).await;
        assert_eq!(text, prompt);
    }
}
