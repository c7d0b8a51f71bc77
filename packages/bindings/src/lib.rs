use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_sim_core::{
    convert, round_money, Currency, EngineConfig, LoanScenario, LoanSimulator, SimulationRequest,
    VariableRateScenario,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn simulator() -> NapiResult<LoanSimulator> {
    LoanSimulator::new(EngineConfig::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulations
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_loan(input_json: String) -> NapiResult<String> {
    let scenario: LoanScenario = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulator()?.simulate(&scenario);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_variable_rate_loan(input_json: String) -> NapiResult<String> {
    let scenario: VariableRateScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulator()?.simulate_variable_rate(&scenario);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_loan_batch(input_json: String) -> NapiResult<String> {
    let requests: Vec<SimulationRequest> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulator()?.simulate_batch(&requests);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ConversionInput {
    amount: Decimal,
    from: Currency,
    to: Currency,
}

#[napi]
pub fn convert_currency(input_json: String) -> NapiResult<String> {
    let input: ConversionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let table = EngineConfig::default().currencies;
    let converted = round_money(convert(&table, input.amount, Some(input.from), Some(input.to)));
    serde_json::to_string(&serde_json::json!({
        "amount": input.amount,
        "from": input.from,
        "to": input.to,
        "converted": converted,
    }))
    .map_err(to_napi_error)
}
