use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_sim_core::{
    Currency, FinancialIndex, LoanScenario, SimulationRequest, VariableRateScenario,
};

use super::{batch_row, single_result_envelope, Context};
use crate::input;

/// Arguments for a fixed-rate simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Borrower's birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,

    /// Number of monthly payments
    #[arg(long, alias = "months", allow_hyphen_values = true)]
    pub term_months: Option<i32>,

    /// Address to send the result to
    #[arg(long)]
    pub email: Option<String>,

    /// Currency the principal is given in
    #[arg(long, default_value = "BRL")]
    pub input_currency: Currency,

    /// Currency to report figures in
    #[arg(long, default_value = "BRL")]
    pub output_currency: Currency,
}

/// Arguments for a variable-rate simulation
#[derive(Args)]
pub struct VariableRateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, alias = "months", allow_hyphen_values = true)]
    pub term_months: Option<i32>,

    /// Fixed monthly rate component (0.003333 = 0.3333% a month)
    #[arg(long)]
    pub fixed_rate: Option<Decimal>,

    /// Market index for the variable component (CDI, TR, IPCA)
    #[arg(long, alias = "index")]
    pub financial_index: Option<FinancialIndex>,
}

/// Arguments for a batch run
#[derive(Args)]
pub struct BatchArgs {
    /// Path to a JSON array of requests, each tagged with "type": "fixed" or "variable_rate"
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(ctx: &Context, args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario: LoanScenario = match input::read_input(args.input.as_deref())? {
        Some(scenario) => scenario,
        None => LoanScenario {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            birth_date: args.birth_date
                .ok_or("--birth-date is required (or provide --input)")?,
            term_months: args.term_months
                .ok_or("--term-months is required (or provide --input)")?,
            email: args.email,
            input_currency: args.input_currency,
            output_currency: args.output_currency,
        },
    };

    single_result_envelope(ctx, ctx.simulator.simulate(&scenario))
}

pub fn run_variable_rate(
    ctx: &Context,
    args: VariableRateArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario: VariableRateScenario = match input::read_input(args.input.as_deref())? {
        Some(scenario) => scenario,
        None => VariableRateScenario {
            principal: args.principal
                .ok_or("--principal is required (or provide --input)")?,
            term_months: args.term_months
                .ok_or("--term-months is required (or provide --input)")?,
            fixed_rate: args.fixed_rate
                .ok_or("--fixed-rate is required (or provide --input)")?,
            financial_index: args.financial_index
                .ok_or("--financial-index is required (or provide --input)")?,
        },
    };

    single_result_envelope(ctx, ctx.simulator.simulate_variable_rate(&scenario))
}

pub fn run_batch(ctx: &Context, args: BatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let requests: Vec<SimulationRequest> = input::read_input(args.input.as_deref())?
        .ok_or("--input file (or piped JSON) is required for a batch")?;

    let results = ctx.simulator.simulate_batch(&requests);
    let rows: Vec<Value> = results
        .into_iter()
        .map(|r| ctx.localize(r))
        .enumerate()
        .map(|(i, r)| batch_row(i, &r))
        .collect();
    let failed = rows.iter().filter(|r| r["status"] == "failure").count();

    Ok(json!({
        "summary": {
            "items": rows.len(),
            "succeeded": rows.len() - failed,
            "failed": failed,
        },
        "results": rows,
    }))
}
