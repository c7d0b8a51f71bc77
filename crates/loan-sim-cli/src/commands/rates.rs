use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};

use loan_sim_core::lending::age::current_age;
use loan_sim_core::lending::rates::{rate_for_age, InterestRate};

use super::Context;

/// Arguments for the rate table
#[derive(Args)]
pub struct RatesArgs {
    /// Show the rate for a borrower born on this date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,
}

pub fn run_rates(ctx: &Context, args: RatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = ctx.simulator.config();

    let brackets: Vec<Value> = config
        .brackets
        .brackets()
        .iter()
        .map(|b| {
            let rate = InterestRate::from_yearly(b.yearly_rate);
            json!({
                "max_age": b.max_age,
                "yearly_rate": rate.yearly_rate,
                "monthly_rate": rate.monthly_rate,
            })
        })
        .collect();

    let Some(birth_date) = args.birth_date else {
        return Ok(json!({ "brackets": brackets }));
    };

    let age = current_age(birth_date, ctx.simulator.clock());
    let rate = rate_for_age(&config.brackets, age)?;
    Ok(json!({
        "result": {
            "birth_date": birth_date,
            "age": age,
            "yearly_rate": rate.yearly_rate,
            "monthly_rate": rate.monthly_rate,
        },
        "brackets": brackets,
    }))
}
