//! TCP connection attempts
//!
//! A [`Dialer`] performs one timed connection handshake against a target and
//! reports the outcome. The pool only depends on the trait so tests can swap
//! in scripted dialers.

use crate::logging::NetworkLogger;
use crate::models::{ProbeOutcome, ProbeTarget};
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// One connection attempt against a target
#[async_trait]
pub trait Dialer: Send + Sync {
    /// Attempt a connection, giving up after `dial_timeout`.
    ///
    /// Never fails: every kind of error is folded into the outcome.
    async fn dial(&self, target: &ProbeTarget, dial_timeout: Duration) -> ProbeOutcome;
}

/// Dialer backed by real TCP sockets
///
/// The connection is closed right after the handshake; no payload is sent.
pub struct TcpDialer {
    logger: Option<NetworkLogger>,
}

impl TcpDialer {
    pub fn new() -> Self {
        Self { logger: None }
    }

    pub fn with_logger(logger: NetworkLogger) -> Self {
        Self { logger: Some(logger) }
    }
}

impl Default for TcpDialer {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one bounded handshake
enum Handshake<S> {
    Open(S, ProbeOutcome),
    Failed(String),
    TimedOut,
}

/// Drive `connect` for at most `dial_timeout`, timing the handshake
async fn timed_handshake<S, F>(connect: F, dial_timeout: Duration) -> Handshake<S>
where
    F: Future<Output = io::Result<S>>,
{
    let start = Instant::now();
    match timeout(dial_timeout, connect).await {
        Ok(Ok(stream)) => Handshake::Open(stream, ProbeOutcome::from_elapsed(start.elapsed())),
        Ok(Err(e)) => Handshake::Failed(e.to_string()),
        Err(_) => Handshake::TimedOut,
    }
}

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, target: &ProbeTarget, dial_timeout: Duration) -> ProbeOutcome {
        let address = target.address();

        let (outcome, error) = match timed_handshake(TcpStream::connect(address.as_str()), dial_timeout).await {
            Handshake::Open(mut stream, outcome) => {
                // The handshake already counted; a failed close is only reported
                if let Err(e) = stream.shutdown().await {
                    if let Some(logger) = &self.logger {
                        logger.log_close_failure(target, &e.to_string()).await;
                    }
                }
                (outcome, None)
            }
            Handshake::Failed(e) => (ProbeOutcome::failed(), Some(e)),
            Handshake::TimedOut => (
                ProbeOutcome::timed_out(),
                Some(format!("no handshake within {}ms", dial_timeout.as_millis())),
            ),
        };

        if let Some(logger) = &self.logger {
            logger.log_attempt(target, &outcome, error.as_deref()).await;
        }

        outcome
    }
}
