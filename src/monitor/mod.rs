//! The monitoring session: one process-wide object owning the run lifecycle.
//!
//! `Idle -> Running` on [`MonitorSession::start`], `Running -> Stopping -> Idle` on
//! [`MonitorSession::stop`] or when the session-wide shutdown token is cancelled.
//! Every transition is one critical section on `phase` with no `.await` inside, so
//! two concurrent `start` calls can never spawn two loops.

mod params;
mod scan_loop;

use crate::common::CommandError;
use crate::notify::Notifier;
use crate::scanner::OpportunityScanner;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub use params::{
    DEFAULT_BASE_TOKEN, DEFAULT_INTERVAL, DEFAULT_MIN_PROFIT, DEFAULT_SILENCE_INTERVAL,
    DEFAULT_TOKENS, MonitorParams,
};
pub use scan_loop::{ScanLoop, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    /// Cancellation requested; the stop notification has not been delivered yet.
    Stopping,
}

impl MonitorState {
    pub fn is_running(&self) -> bool {
        matches!(self, MonitorState::Running)
    }
}

// `done` flips to true once the run has sent its stop notification
enum Phase {
    Idle,
    Running {
        run_id: u64,
        cancel: CancellationToken,
        handle: JoinHandle<()>,
        done: watch::Receiver<bool>,
    },
    Stopping {
        run_id: u64,
        done: watch::Receiver<bool>,
    },
}

impl Phase {
    fn run_id(&self) -> Option<u64> {
        match self {
            Phase::Idle => None,
            Phase::Running { run_id, .. } | Phase::Stopping { run_id, .. } => Some(*run_id),
        }
    }

    fn state(&self) -> MonitorState {
        match self {
            Phase::Idle => MonitorState::Idle,
            Phase::Running { .. } => MonitorState::Running,
            Phase::Stopping { .. } => MonitorState::Stopping,
        }
    }
}

pub struct MonitorSession {
    scanner: Arc<OpportunityScanner>,
    notifier: Arc<dyn Notifier>,
    phase: Arc<Mutex<Phase>>,
    shutdown: CancellationToken,
    next_run_id: AtomicU64,
}

impl MonitorSession {
    pub fn new(scanner: Arc<OpportunityScanner>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_shutdown(scanner, notifier, CancellationToken::new())
    }

    /// Every run's token is a child of `shutdown`; cancelling it stops any running loop.
    pub fn with_shutdown(
        scanner: Arc<OpportunityScanner>,
        notifier: Arc<dyn Notifier>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            scanner,
            notifier,
            phase: Arc::new(Mutex::new(Phase::Idle)),
            shutdown,
            next_run_id: AtomicU64::new(1),
        }
    }

    pub fn status(&self) -> MonitorState {
        self.phase.lock().state()
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    /// Spawns the scan loop. The loop itself sends the start notification.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, params: MonitorParams) -> Result<(), CommandError> {
        let mut phase = self.phase.lock();

        match &*phase {
            Phase::Running { .. } => return Err(CommandError::AlreadyRunning),
            Phase::Stopping { .. } => return Err(CommandError::StopInProgress),
            Phase::Idle => {}
        }

        params.validate()?;

        let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);
        let cancel = self.shutdown.child_token();
        let (done_tx, done) = watch::channel(false);

        info!(
            run_id,
            tokens = params.tokens.len(),
            base_token = %params.base_token,
            interval_secs = params.interval.as_secs_f64(),
            min_profit = params.min_profit,
            "starting monitoring session"
        );

        let scan_loop = ScanLoop::new(
            Arc::clone(&self.scanner),
            Arc::clone(&self.notifier),
            params,
            Instant::now(),
        );
        let handle = tokio::spawn(run_session(
            scan_loop,
            cancel.clone(),
            Arc::clone(&self.phase),
            run_id,
            done_tx,
        ));

        *phase = Phase::Running {
            run_id,
            cancel,
            handle,
            done,
        };

        Ok(())
    }

    /// Cancels the running loop and returns once its stop notification went out.
    pub async fn stop(&self) -> Result<(), CommandError> {
        let (run_id, cancel, handle) = {
            let mut phase = self.phase.lock();
            match std::mem::replace(&mut *phase, Phase::Idle) {
                Phase::Running {
                    run_id,
                    cancel,
                    handle,
                    done,
                } => {
                    *phase = Phase::Stopping { run_id, done };
                    (run_id, cancel, handle)
                }
                stopping @ Phase::Stopping { .. } => {
                    *phase = stopping;
                    return Err(CommandError::StopInProgress);
                }
                Phase::Idle => return Err(CommandError::NotRunning),
            }
        };

        info!(run_id, "stopping monitoring session");
        cancel.cancel();

        if let Err(e) = handle.await {
            error!(run_id, error = %e, "scan loop terminated abnormally");
        }

        finish_run(&self.phase, run_id);
        Ok(())
    }

    /// Stops any running loop for good and waits for its stop notification, including
    /// one already being stopped by a concurrent `stop`.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        if let Err(CommandError::StopInProgress) = self.stop().await {
            let done = {
                let phase = self.phase.lock();
                match &*phase {
                    Phase::Stopping { done, .. } => Some(done.clone()),
                    _ => None,
                }
            };
            if let Some(mut done) = done {
                // A dropped sender means the run task is gone as well
                let _ = done.wait_for(|finished| *finished).await;
            }
        }
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        // Spawned loops hold no reference to the session
        self.shutdown.cancel();
    }
}

async fn run_session(
    mut scan_loop: ScanLoop,
    cancel: CancellationToken,
    phase: Arc<Mutex<Phase>>,
    run_id: u64,
    done: watch::Sender<bool>,
) {
    scan_loop.announce_start().await;
    scan_loop.run(&cancel).await;
    scan_loop.announce_stop().await;

    finish_run(&phase, run_id);
    done.send_replace(true);
    info!(run_id, ticks = scan_loop.ticks(), "monitoring session stopped");
}

// A newer run may already own the phase; only clear our own
fn finish_run(phase: &Mutex<Phase>, run_id: u64) {
    let mut phase = phase.lock();
    if phase.run_id() == Some(run_id) {
        *phase = Phase::Idle;
    }
}
