use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_sim_core::{convert, round_money, Currency};

use super::Context;

/// Arguments for a currency conversion
#[derive(Args)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Decimal,

    /// Source currency
    #[arg(long)]
    pub from: Currency,

    /// Destination currency
    #[arg(long)]
    pub to: Currency,
}

pub fn run_convert(ctx: &Context, args: ConvertArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = &ctx.simulator.config().currencies;
    let converted = convert(table, args.amount, Some(args.from), Some(args.to));
    let cross_rate = convert(table, Decimal::ONE, Some(args.from), Some(args.to));

    Ok(json!({
        "result": {
            "amount": args.amount,
            "from": args.from,
            "to": args.to,
            "converted": round_money(converted),
            "cross_rate": cross_rate,
        }
    }))
}
