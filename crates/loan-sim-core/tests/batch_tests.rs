use std::sync::Arc;

use chrono::NaiveDate;
use loan_sim_core::{
    BatchConfig, EngineConfig, FailureKind, FinancialIndex, FixedClock, LoanScenario,
    LoanSimulator, SimulationRequest, SimulationResult, VariableRateScenario,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn simulator(max_concurrency: usize) -> LoanSimulator {
    let config = EngineConfig {
        batch: BatchConfig { max_concurrency },
        ..EngineConfig::default()
    };
    LoanSimulator::new(config)
        .unwrap()
        .with_clock(Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap())))
}

fn fixed(principal: Decimal, term: i32) -> SimulationRequest {
    LoanScenario::new(principal, NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(), term).into()
}

fn variable(term: i32) -> SimulationRequest {
    VariableRateScenario {
        principal: dec!(50000),
        term_months: term,
        fixed_rate: dec!(0.002),
        financial_index: FinancialIndex::TR,
    }
    .into()
}

#[test]
fn test_empty_batch() {
    assert!(simulator(4).simulate_batch(&[]).is_empty());
}

#[test]
fn test_single_item_batch() {
    let results = simulator(4).simulate_batch(&[fixed(dec!(10000), 60)]);
    assert_eq!(results.len(), 1);
    assert!(results[0].is_success());
}

#[test]
fn test_mixed_batch_matches_sequential_run() {
    let sim = simulator(3);
    let requests: Vec<SimulationRequest> = (0..50)
        .map(|i| match i % 5 {
            0 => fixed(dec!(0), 12),
            1 => fixed(dec!(5000), 2000),
            2 => variable(24),
            3 => variable(0),
            _ => fixed(dec!(1000) * Decimal::from(i), 12 + i),
        })
        .collect();

    let batch = sim.simulate_batch(&requests);
    let sequential: Vec<SimulationResult> =
        requests.iter().map(|r| sim.simulate_request(r)).collect();

    assert_eq!(batch.len(), requests.len());
    assert_eq!(batch, sequential);
    assert_eq!(batch[0].failure_kind(), Some(FailureKind::PrincipalTooLow));
    assert_eq!(batch[1].failure_kind(), Some(FailureKind::TermTooLong));
    assert!(batch[2].variable_rate().is_some());
    assert_eq!(batch[3].failure_kind(), Some(FailureKind::NonPositiveTerm));
    assert!(batch[4].fixed().is_some());
}

#[test]
fn test_default_cap_uses_available_parallelism() {
    let scenarios: Vec<LoanScenario> = (1..=20)
        .map(|i| LoanScenario::new(dec!(1000), NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(), i))
        .collect();
    let results = simulator(0).simulate_scenarios(&scenarios);
    let terms: Vec<i32> = results.iter().map(|r| r.fixed().unwrap().term_months).collect();
    assert_eq!(terms, (1..=20).collect::<Vec<_>>());
}
