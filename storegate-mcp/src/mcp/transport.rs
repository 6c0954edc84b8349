//! Line-delimited JSON-RPC framing for the MCP session.
//!
//! Requests arrive one JSON object per line; responses are written the same
//! way. The transport is generic over its reader and writer so tests can
//! drive it from in-memory buffers; the server runs it over stdio.

use crate::error::Result;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::trace;

/// Line-framed JSON-RPC transport over any async byte stream pair.
pub struct Transport<R, W> {
    input: Lines<BufReader<R>>,
    output: W,
}

/// The transport the server actually runs on: stdin/stdout.
pub type StdioTransport = Transport<tokio::io::Stdin, tokio::io::Stdout>;

impl StdioTransport {
    /// Create a transport over this process's stdio.
    pub fn new() -> Self {
        Transport::from_parts(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, W> Transport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Build a transport from an arbitrary reader/writer pair.
    pub fn from_parts(reader: R, writer: W) -> Self {
        Self {
            input: BufReader::new(reader).lines(),
            output: writer,
        }
    }

    /// Next request from the peer, or `None` once the input closes.
    ///
    /// Blank lines between frames are tolerated and skipped. A frame that is
    /// not valid JSON-RPC aborts the session with the parse error.
    pub async fn read_request(&mut self) -> Result<Option<JsonRpcRequest>> {
        while let Some(line) = self.input.next_line().await? {
            let frame = line.trim();
            if frame.is_empty() {
                continue;
            }

            trace!("Received frame: {}", frame);
            let request: JsonRpcRequest = serde_json::from_str(frame)?;
            return Ok(Some(request));
        }

        trace!("Input closed, no more requests");
        Ok(None)
    }

    /// Write one response as a single line and flush it.
    pub async fn write_response(&mut self, response: JsonRpcResponse) -> Result<()> {
        let mut frame = serde_json::to_vec(&response)?;
        frame.push(b'\n');

        self.output.write_all(&frame).await?;
        self.output.flush().await?;

        trace!("Sent response for id={:?}", response.id);
        Ok(())
    }
}
