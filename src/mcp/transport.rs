// ABOUTME: Transport abstraction for MCP and the stdio implementation that
// ABOUTME: owns a child process speaking newline-delimited JSON-RPC.

use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{McpNotification, McpRequest, McpResponse, McpServerConfig};
use crate::error::McpError;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<McpResponse>>>>;

/// Request/response channel to an MCP server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the matching response.
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError>;

    /// Send a notification (no response expected).
    async fn notify(&self, notification: McpNotification) -> Result<(), McpError>;

    /// Stop the server. Calling it twice is harmless.
    async fn shutdown(&self) -> Result<(), McpError>;
}

/// Spawns a server process and exchanges one JSON message per line over
/// its stdin and stdout. The child's stderr is inherited.
pub struct StdioTransport {
    server: String,
    timeout: Duration,
    child: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    pending: Pending,
    reader_handle: Mutex<Option<JoinHandle<()>>>,
}

impl StdioTransport {
    /// Spawn the server described by `config`.
    pub fn spawn(config: &McpServerConfig) -> Result<Self, McpError> {
        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .envs(config.env.iter())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &config.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            McpError::Connection(format!("failed to start '{}': {}", config.command, e))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| McpError::Connection("Failed to open stdin".into()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| McpError::Connection("Failed to open stdout".into()))?;

        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));

        let pending_clone = pending.clone();
        let server = config.name.clone();
        let reader_handle = tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => route_line(&server, &line, &pending_clone).await,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(server = %server, error = %e, "failed reading server output");
                        break;
                    }
                }
            }
            debug!(server = %server, "server output closed");
            // Dropping the senders wakes every waiter with a closed channel.
            pending_clone.lock().await.clear();
        });

        Ok(Self {
            server: config.name.clone(),
            timeout: config.timeout,
            child: Mutex::new(Some(child)),
            stdin: Mutex::new(Some(stdin)),
            pending,
            reader_handle: Mutex::new(Some(reader_handle)),
        })
    }

    async fn write_line(&self, json: String) -> Result<(), McpError> {
        let mut stdin = self.stdin.lock().await;
        let stdin_ref = stdin
            .as_mut()
            .ok_or_else(|| McpError::Connection("Server connection closed".into()))?;
        stdin_ref.write_all(json.as_bytes()).await?;
        stdin_ref.write_all(b"\n").await?;
        stdin_ref.flush().await?;
        Ok(())
    }
}

/// Deliver one line of server output to whoever is waiting on its id.
///
/// Server-initiated requests and notifications carry a `method` and are skipped.
async fn route_line(server: &str, line: &str, pending: &Pending) {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(_) => {
            debug!(server, line, "ignoring non-JSON server output");
            return;
        }
    };
    if value.get("method").is_some() {
        debug!(server, "ignoring server-initiated message");
        return;
    }
    match serde_json::from_value::<McpResponse>(value) {
        Ok(response) => {
            if let Some(tx) = pending.lock().await.remove(&response.id) {
                let _ = tx.send(response);
            }
        }
        Err(e) => debug!(server, error = %e, "ignoring malformed response"),
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&self, request: McpRequest) -> Result<McpResponse, McpError> {
        let id = request.id;
        let method = request.method.clone();

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let write_result = match serde_json::to_string(&request) {
            Ok(json) => self.write_line(json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = write_result {
            self.pending.lock().await.remove(&id);
            return Err(e);
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(McpError::Connection(format!(
                "server '{}' closed before answering '{}'",
                self.server, method
            ))),
            Err(_) => {
                self.pending.lock().await.remove(&id);
                Err(McpError::Timeout {
                    method,
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }

    async fn notify(&self, notification: McpNotification) -> Result<(), McpError> {
        let json = serde_json::to_string(&notification)?;
        self.write_line(json).await
    }

    async fn shutdown(&self) -> Result<(), McpError> {
        self.stdin.lock().await.take();

        if let Some(mut child) = self.child.lock().await.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, child.wait()).await.is_err() {
                debug!(server = %self.server, "server did not exit, killing");
                let _ = child.kill().await;
            }
        }

        if let Some(handle) = self.reader_handle.lock().await.take() {
            handle.abort();
        }

        Ok(())
    }
}
