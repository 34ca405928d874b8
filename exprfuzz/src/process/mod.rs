//! Candidate evaluation through an external binary
//!
//! The system under test is started once per expression with the expression,
//! wrapped in single quotes, as its only argument. Its standard output is the
//! candidate result. Standard error is inherited and the exit status is only
//! logged, never checked.

pub mod timeout;

use crate::{FuzzError, FuzzResult};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use timeout::TimeoutTracker;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Anything that can produce a candidate result for an expression
pub trait CandidateEvaluator {
    /// Evaluate `expression`, returning the raw text the evaluator produced
    fn evaluate(&mut self, expression: &str) -> FuzzResult<String>;
}

impl<F> CandidateEvaluator for F
where
    F: FnMut(&str) -> FuzzResult<String>,
{
    fn evaluate(&mut self, expression: &str) -> FuzzResult<String> {
        self(expression)
    }
}

/// Runs the system under test as a child process
#[derive(Debug, Clone)]
pub struct ExternalEvaluator {
    binary: PathBuf,
    timeout: Option<Duration>,
}

impl ExternalEvaluator {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    /// Kill the child and fail the run if it has not exited after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The argument passed to the binary: the expression inside literal single quotes
    pub fn quote(expression: &str) -> String {
        format!("'{}'", expression)
    }

    fn spawn(&self, expression: &str) -> FuzzResult<ChildGuard> {
        let child = Command::new(&self.binary)
            .arg(Self::quote(expression))
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| FuzzError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;
        debug!(pid = child.id(), binary = %self.binary.display(), "Spawned candidate");
        Ok(ChildGuard { child })
    }

    fn wait_with_deadline(
        &self,
        child: &mut ChildGuard,
        stdout: Option<ChildStdout>,
        limit: Duration,
        expression: &str,
    ) -> FuzzResult<(Vec<u8>, ExitStatus)> {
        // Drain stdout on a helper thread so a chatty child cannot block on a full pipe.
        let reader = stdout.map(|mut out| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                out.read_to_end(&mut buf).map(|_| buf)
            })
        });

        let tracker = TimeoutTracker::new(limit);
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            tracker.check_timeout(&self.binary, expression)?;
            thread::sleep(POLL_INTERVAL);
        };

        let bytes = match reader {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::other("stdout reader thread panicked"))??,
            None => Vec::new(),
        };
        Ok((bytes, status))
    }
}

impl CandidateEvaluator for ExternalEvaluator {
    fn evaluate(&mut self, expression: &str) -> FuzzResult<String> {
        let mut child = self.spawn(expression)?;
        let stdout = child.take_stdout();

        let (bytes, status) = match self.timeout {
            Some(limit) => self.wait_with_deadline(&mut child, stdout, limit, expression)?,
            None => {
                let mut buf = Vec::new();
                if let Some(mut out) = stdout {
                    out.read_to_end(&mut buf)?;
                }
                (buf, child.wait()?)
            }
        };

        if status.success() {
            debug!(%status, bytes = bytes.len(), "Candidate exited");
        } else {
            warn!(%status, expression, "Candidate exited unsuccessfully");
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// A running child that is killed and reaped if dropped before it exits
struct ChildGuard {
    child: Child,
}

impl ChildGuard {
    fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            debug!(pid = self.child.id(), "Killing unfinished candidate");
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
