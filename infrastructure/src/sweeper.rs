//! Periodic expiry sweeper task
//!
//! Runs the sweep use case on a fixed cadence (default one minute), with an
//! immediate first pass on start. The task is torn down through a
//! cancellation token; an interrupted cycle just leaves proposals un-swept
//! until the next run.

use council_application::ports::clock::Clock;
use council_application::state::CouncilState;
use council_application::use_cases::SweepProposalsUseCase;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Long-running expiry sweeper over shared state.
pub struct ExpirySweeper {
    state: Arc<Mutex<CouncilState>>,
    sweep: SweepProposalsUseCase,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(state: Arc<Mutex<CouncilState>>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            state,
            sweep: SweepProposalsUseCase::new(clock),
            interval,
        }
    }

    /// Run one pass immediately. Returns the number of proposals removed.
    pub fn sweep_once(&self) -> usize {
        match self.state.lock() {
            Ok(mut state) => self.sweep.execute(&mut state),
            Err(e) => {
                warn!("sweep skipped: state lock poisoned: {}", e);
                0
            }
        }
    }

    /// Spawn the periodic task. The first tick fires immediately.
    pub fn spawn(self, token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("expiry sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = self.sweep_once();
                        if removed > 0 {
                            info!("expiry sweeper removed {} proposal(s)", removed);
                        }
                    }
                }
            }
        })
    }
}
