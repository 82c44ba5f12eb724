//! Line-delimited JSON transport.
//!
//! Reads one request object per line and writes one response envelope per
//! line. Blank lines are ignored and end of input stops the loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

use super::{ApiServer, ServerError, ServerResult};
use crate::query::SearchEngine;

/// Serve requests from `reader` until it is exhausted.
///
/// # Errors
/// Returns `ServerError::Transport` if reading or writing fails.
pub async fn serve<E, R, W>(server: &ApiServer<E>, reader: R, mut writer: W) -> ServerResult<()>
where
    E: SearchEngine,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ServerError::Transport(e.to_string()))?
    {
        if line.trim().is_empty() {
            continue;
        }
        debug!(request = %line, "<-");

        let response = server.handle_line(&line).await;
        let mut json =
            serde_json::to_string(&response).map_err(|e| ServerError::Other(e.to_string()))?;
        json.push('\n');

        debug!(status = response.status, "->");
        writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;
        handled += 1;
    }

    debug!(handled, "Input closed");
    Ok(())
}

/// Serve over the process's stdin and stdout.
pub async fn serve_stdio<E: SearchEngine>(server: &ApiServer<E>) -> ServerResult<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(server, stdin, stdout).await
}
