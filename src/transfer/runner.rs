// file: src/transfer/runner.rs
// version: 1.0.0
// guid: cc11dc1e-c477-4224-b70a-9e041382bfbc

//! Subprocess execution with a timeout and merged output capture

use super::command::{build_command, CommandLine, TransferSpec};
use crate::config::BridgeConfig;
use crate::error::{Result, TransferError};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Result of a transfer that ran to completion
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub command: CommandLine,
    /// Exit code, or -1 when the process was terminated by a signal
    pub return_code: i32,
    /// stdout and stderr interleaved in arrival order
    pub output: String,
    pub duration: Duration,
}

impl TransferOutcome {
    pub fn success(&self) -> bool {
        self.return_code == 0
    }
}

/// Return the executable path if found on PATH
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Runs rsync/rclone invocations described by [`TransferSpec`]
#[derive(Debug, Clone)]
pub struct TransferRunner {
    config: BridgeConfig,
}

impl TransferRunner {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Check required fields before anything is spawned
    pub fn validate(spec: &TransferSpec) -> Result<()> {
        if spec.source.trim().is_empty() || spec.destination.trim().is_empty() {
            return Err(TransferError::missing_field(
                "'source' and 'destination' are required",
            ));
        }
        Ok(())
    }

    /// Run one transfer, bounded by `timeout_secs` (clamped by config).
    ///
    /// A non-zero exit code is still `Ok`; only lookup, spawn and timeout
    /// failures are errors.
    pub async fn run(&self, spec: &TransferSpec, timeout_secs: Option<u64>) -> Result<TransferOutcome> {
        Self::validate(spec)?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("transfer", %run_id, tool = %spec.tool);
        self.run_validated(spec, timeout_secs).instrument(span).await
    }

    async fn run_validated(&self, spec: &TransferSpec, timeout_secs: Option<u64>) -> Result<TransferOutcome> {
        let command = build_command(spec, &self.config);
        let timeout = self.config.execution.effective_timeout(timeout_secs);
        let program = self.locate(spec, &command)?;

        info!("Executing: {} (timeout {}s)", command, timeout);

        let mut process = Command::new(&program);
        if let Some(env) = &spec.env {
            debug!("Passing {} extra environment variables", env.len());
            process.envs(env);
        }

        let mut child = process
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    TransferError::spawn(format!("Command not found: {}", command.program))
                }
                _ => TransferError::spawn(format!("Failed to execute {}: {}", command.program, e)),
            })?;

        let started = Instant::now();
        let mut collector = OutputCollector::default();
        let waited = tokio::time::timeout(
            Duration::from_secs(timeout),
            collect_merged_output(&mut child, &mut collector),
        )
        .await;

        let status = match waited {
            Ok(status) => status.map_err(|e| {
                TransferError::spawn(format!("Failed while running {}: {}", command.program, e))
            })?,
            Err(_) => {
                warn!("{} timed out after {}s, killing process", spec.tool, timeout);
                if let Err(e) = child.kill().await {
                    debug!("Failed to kill timed out process: {}", e);
                }
                return Err(TransferError::Timeout {
                    tool: spec.tool.to_string(),
                    seconds: timeout,
                    partial_output: collector.finish(),
                });
            }
        };

        let duration = started.elapsed();
        let output = collector.finish();
        let return_code = status.code().unwrap_or(-1);
        info!(
            "{} finished with exit code {} in {:.2}s",
            spec.tool,
            return_code,
            duration.as_secs_f64()
        );

        Ok(TransferOutcome {
            command,
            return_code,
            output,
            duration,
        })
    }

    /// Resolve the program to spawn, reporting a missing tool before spawning
    fn locate(&self, spec: &TransferSpec, command: &CommandLine) -> Result<PathBuf> {
        match find_executable(&command.program) {
            Some(path) => Ok(path),
            None if spec.use_wsl => Err(TransferError::executable_not_found(format!(
                "Command not found: {}",
                command.program
            ))),
            None => Err(TransferError::executable_not_found(format!(
                "{tool} executable not found on PATH. On Windows, consider using WSL or install {tool}.",
                tool = spec.tool
            ))),
        }
    }
}

/// Merged output plus the unterminated tail of each stream
#[derive(Debug, Default)]
struct OutputCollector {
    output: String,
    stdout_buf: Vec<u8>,
    stderr_buf: Vec<u8>,
}

impl OutputCollector {
    /// Flush both tails (e.g. `\r` progress lines) and return everything
    fn finish(mut self) -> String {
        drain_into(&mut self.stdout_buf, &mut self.output);
        drain_into(&mut self.stderr_buf, &mut self.output);
        self.output
    }
}

/// Read stdout and stderr line by line into one buffer, then reap the child
async fn collect_merged_output(
    child: &mut Child,
    collector: &mut OutputCollector,
) -> std::io::Result<ExitStatus> {
    let mut stdout = child.stdout.take().map(BufReader::new);
    let mut stderr = child.stderr.take().map(BufReader::new);

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_line(&mut stdout, &mut collector.stdout_buf), if stdout.is_some() => {
                if read? == 0 {
                    stdout = None;
                }
                drain_into(&mut collector.stdout_buf, &mut collector.output);
            }
            read = read_line(&mut stderr, &mut collector.stderr_buf), if stderr.is_some() => {
                if read? == 0 {
                    stderr = None;
                }
                drain_into(&mut collector.stderr_buf, &mut collector.output);
            }
        }
    }

    child.wait().await
}

// read_until keeps partial bytes in `buf` when cancelled, so the buffers
// live in the collector rather than in the timed future.
async fn read_line<R>(reader: &mut Option<BufReader<R>>, buf: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: tokio::io::AsyncRead + Unpin,
{
    match reader {
        Some(reader) => reader.read_until(b'\n', buf).await,
        None => Ok(0),
    }
}

fn drain_into(buf: &mut Vec<u8>, output: &mut String) {
    if !buf.is_empty() {
        output.push_str(&String::from_utf8_lossy(buf));
        buf.clear();
    }
}
