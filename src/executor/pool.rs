//! Fixed-size pool of dial workers
//!
//! Every outbound connection attempt in the process goes through one
//! [`WorkerPool`]. Admission is gated by a semaphore holding one permit per
//! worker: `submit` waits for a permit before enqueueing, and the permit
//! travels with the job until its dial has finished. At most `worker_count`
//! dials are therefore in flight at any time, and a submitter blocks while
//! all workers are busy.

use crate::dialer::Dialer;
use crate::error::{AppError, Result};
use crate::executor::ExecutionConfig;
use crate::logging::NetworkLogger;
use crate::models::{ProbeOutcome, ProbeTarget};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::sync::mpsc::error::TrySendError;

/// One dial attempt waiting for a worker
pub struct ProbeJob {
    target: ProbeTarget,
    reply: mpsc::Sender<ProbeOutcome>,
    _permit: OwnedSemaphorePermit,
}

impl ProbeJob {
    pub fn target(&self) -> &ProbeTarget {
        &self.target
    }
}

/// Handle to the shared worker pool
///
/// Cloning is cheap; all clones feed the same workers. The workers stop once
/// every handle has been dropped and the queue is drained.
#[derive(Clone)]
pub struct WorkerPool {
    sender: mpsc::Sender<ProbeJob>,
    admission: Arc<Semaphore>,
    worker_count: usize,
}

impl WorkerPool {
    /// Spawn `worker_count` workers on the current runtime
    pub fn start(
        config: &ExecutionConfig,
        dialer: Arc<dyn Dialer>,
        logger: Option<NetworkLogger>,
    ) -> Result<Self> {
        config.validate()?;

        let (sender, receiver) = mpsc::channel::<ProbeJob>(config.worker_count);
        let receiver = Arc::new(Mutex::new(receiver));

        for _ in 0..config.worker_count {
            tokio::spawn(run_worker(
                Arc::clone(&receiver),
                Arc::clone(&dialer),
                config.dial_timeout,
                logger.clone(),
            ));
        }

        Ok(Self {
            sender,
            admission: Arc::new(Semaphore::new(config.worker_count)),
            worker_count: config.worker_count,
        })
    }

    /// Queue one dial attempt for `target`.
    ///
    /// Waits until a worker is free. The outcome is delivered on `reply`.
    pub async fn submit(&self, target: ProbeTarget, reply: mpsc::Sender<ProbeOutcome>) -> Result<()> {
        let permit = Arc::clone(&self.admission)
            .acquire_owned()
            .await
            .map_err(|_| AppError::internal("Worker pool admission closed"))?;

        let job = ProbeJob {
            target,
            reply,
            _permit: permit,
        };

        self.sender
            .send(job)
            .await
            .map_err(|_| AppError::internal("Worker pool is shut down"))
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Workers not currently reserved by a queued or running job
    pub fn idle_workers(&self) -> usize {
        self.admission.available_permits()
    }
}

async fn run_worker(
    receiver: Arc<Mutex<mpsc::Receiver<ProbeJob>>>,
    dialer: Arc<dyn Dialer>,
    dial_timeout: Duration,
    logger: Option<NetworkLogger>,
) {
    loop {
        let job = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };

        let Some(job) = job else {
            break;
        };

        let outcome = dialer.dial(&job.target, dial_timeout).await;

        // The reply channel is sized to the probe's attempts, so this never waits
        match job.reply.try_send(outcome) {
            Ok(()) => {}
            Err(TrySendError::Closed(_)) | Err(TrySendError::Full(_)) => {
                if let Some(logger) = &logger {
                    logger.log_undelivered(&job.target).await;
                }
            }
        }
        // Dropping the job releases its admission permit
    }
}
