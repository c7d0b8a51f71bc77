pub mod convert;
pub mod rates;
pub mod simulate;

use serde_json::{json, Value};

use loan_sim_core::messages::localize;
use loan_sim_core::{BundledMessages, LoanSimulator, Simulation, SimulationResult};

/// Shared state for one CLI invocation.
pub struct Context {
    pub simulator: LoanSimulator,
    pub locale: String,
}

impl Context {
    pub fn localize(&self, result: SimulationResult) -> SimulationResult {
        localize(result, &BundledMessages, &self.locale)
    }
}

/// Wrap a single result for the output formatters: figures under `result`,
/// a variable-rate schedule under `evolution`. A failure becomes an error.
pub fn single_result_envelope(
    ctx: &Context,
    result: SimulationResult,
) -> Result<Value, Box<dyn std::error::Error>> {
    match ctx.localize(result) {
        SimulationResult::Success {
            simulation: Simulation::Fixed(sim),
        } => Ok(json!({ "result": sim })),
        SimulationResult::Success {
            simulation: Simulation::VariableRate(sim),
        } => Ok(json!({
            "result": {
                "final_value": sim.final_value,
                "total_interest": sim.total_interest,
                "original_value": sim.original_value,
                "term_months": sim.term_months,
            },
            "evolution": sim.evolution,
        })),
        SimulationResult::Failure { kind, message } => {
            Err(format!("{message} ({})", kind.code()).into())
        }
    }
}

/// One flat row per batch item, in input order.
pub fn batch_row(index: usize, result: &SimulationResult) -> Value {
    match result {
        SimulationResult::Success {
            simulation: Simulation::Fixed(sim),
        } => json!({
            "index": index,
            "status": "success",
            "type": "fixed",
            "periodic_payment": sim.periodic_payment,
            "final_value": sim.final_value,
            "total_interest": sim.total_interest,
            "currency": sim.currency,
            "message": null,
        }),
        SimulationResult::Success {
            simulation: Simulation::VariableRate(sim),
        } => json!({
            "index": index,
            "status": "success",
            "type": "variable_rate",
            "periodic_payment": sim.evolution.first().map(|s| s.payment),
            "final_value": sim.final_value,
            "total_interest": sim.total_interest,
            "currency": null,
            "message": null,
        }),
        SimulationResult::Failure { kind, message } => json!({
            "index": index,
            "status": "failure",
            "type": kind,
            "periodic_payment": null,
            "final_value": null,
            "total_interest": null,
            "currency": null,
            "message": message,
        }),
    }
}
