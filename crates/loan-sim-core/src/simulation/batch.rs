//! Bounded-concurrency execution of many independent simulations.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::lending::scenario::{LoanScenario, SimulationRequest};
use crate::simulation::orchestrator::LoanSimulator;
use crate::simulation::result::{FailureKind, SimulationResult};

/// Run `job` over `items` with at most `max_concurrency` calls in flight.
///
/// Output order matches input order. A panicking job becomes an `Internal`
/// failure for that item only. The worker pool lives for this call only.
pub fn run_batch<T, F>(items: &[T], max_concurrency: usize, job: F) -> Vec<SimulationResult>
where
    T: Sync,
    F: Fn(&T) -> SimulationResult + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }

    let threads = max_concurrency.max(1).min(items.len());
    let start = Instant::now();
    info!(items = items.len(), threads, "batch started");

    let results: Vec<SimulationResult> = match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("loan-sim-batch-{i}"))
        .build()
    {
        Ok(pool) => pool.install(|| items.par_iter().map(|item| run_isolated(&job, item)).collect()),
        Err(e) => {
            warn!(error = %e, "could not build batch pool; running sequentially");
            items.iter().map(|item| run_isolated(&job, item)).collect()
        }
    };

    let failed = results.iter().filter(|r| !r.is_success()).count();
    info!(
        items = results.len(),
        succeeded = results.len() - failed,
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch finished"
    );
    results
}

fn run_isolated<T, F>(job: &F, item: &T) -> SimulationResult
where
    F: Fn(&T) -> SimulationResult,
{
    panic::catch_unwind(AssertUnwindSafe(|| job(item))).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!(%reason, "simulation panicked");
        SimulationResult::failure(FailureKind::Internal, format!("simulation panicked: {reason}"))
    })
}

impl LoanSimulator {
    /// Simulate every request under the configured concurrency cap.
    pub fn simulate_batch(&self, requests: &[SimulationRequest]) -> Vec<SimulationResult> {
        run_batch(
            requests,
            self.config().batch.effective_concurrency(),
            |request| self.simulate_request(request),
        )
    }

    pub fn simulate_scenarios(&self, scenarios: &[LoanScenario]) -> Vec<SimulationResult> {
        run_batch(
            scenarios,
            self.config().batch.effective_concurrency(),
            |scenario| self.simulate(scenario),
        )
    }
}
