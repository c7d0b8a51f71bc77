use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::currency::MonetaryConverter;
use crate::lending::amortization::{monthly_payment, AnnuityTotals};
use crate::lending::rates::rate_for_birth_date;
use crate::lending::scenario::{LoanScenario, SimulationRequest, VariableRateScenario};
use crate::lending::validation::{validate_scenario, validate_variable_scenario};
use crate::lending::variable_rate::simulate_variable_rate_loan;
use crate::notify::{NoopNotifier, Notifier};
use crate::simulation::result::{FailureKind, LoanSimulation, Simulation, SimulationResult};
use crate::types::round_money;
use crate::LoanSimResult;

/// Entry point for single simulations. Cheap to clone; every clone shares
/// the same configuration and collaborators.
#[derive(Clone)]
pub struct LoanSimulator {
    config: Arc<EngineConfig>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for LoanSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoanSimulator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LoanSimulator {
    /// Validate `config` and build a simulator on the system clock with no
    /// notification.
    pub fn new(config: EngineConfig) -> LoanSimResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            notifier: Arc::new(NoopNotifier),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Validate, price and convert a fixed-rate scenario, then notify its
    /// address if one is set.
    pub fn simulate(&self, scenario: &LoanScenario) -> SimulationResult {
        let today = self.clock.today();
        if let Err(kind) = validate_scenario(scenario, &self.config.limits, today) {
            debug!(?kind, "scenario rejected");
            return kind.into();
        }

        let simulation = match self.price(scenario) {
            Ok(s) => s,
            Err(e) => return internal_failure(e),
        };

        if let Some(address) = scenario.notification_address() {
            if let Err(e) = self.notifier.notify(address, &simulation) {
                warn!(address, error = %e, "notification failed");
            }
        }

        SimulationResult::success(Simulation::Fixed(simulation))
    }

    pub fn simulate_variable_rate(&self, scenario: &VariableRateScenario) -> SimulationResult {
        if let Err(kind) = validate_variable_scenario(scenario, &self.config.limits) {
            debug!(?kind, "variable-rate scenario rejected");
            return kind.into();
        }

        match simulate_variable_rate_loan(
            scenario.principal,
            scenario.term_months,
            scenario.fixed_rate,
            scenario.financial_index.average_monthly_variation(),
            &self.config.variable_rate,
        ) {
            Ok(sim) => {
                debug!(
                    final_value = %sim.final_value,
                    months = sim.evolution.len(),
                    "variable-rate simulation complete"
                );
                SimulationResult::success(Simulation::VariableRate(sim))
            }
            Err(e) => internal_failure(e),
        }
    }

    pub fn simulate_request(&self, request: &SimulationRequest) -> SimulationResult {
        match request {
            SimulationRequest::Fixed(s) => self.simulate(s),
            SimulationRequest::VariableRate(s) => self.simulate_variable_rate(s),
        }
    }

    fn price(&self, scenario: &LoanScenario) -> LoanSimResult<LoanSimulation> {
        let rate = rate_for_birth_date(
            &self.config.brackets,
            scenario.birth_date,
            self.clock.as_ref(),
        )?;
        let payment = monthly_payment(scenario.principal, rate.monthly_rate, scenario.term_months)?;

        let converter = MonetaryConverter::new(
            &self.config.currencies,
            scenario.input_currency,
            scenario.output_currency,
        );
        let payment_out = round_money(converter.convert(payment));
        let principal_out = round_money(converter.convert(scenario.principal));
        let totals = AnnuityTotals::from_payment(payment_out, principal_out, scenario.term_months)?;

        debug!(
            yearly_rate = %rate.yearly_rate,
            monthly_rate = %rate.monthly_rate,
            payment = %totals.periodic_payment,
            currency = %converter.output(),
            "loan priced"
        );

        Ok(LoanSimulation {
            periodic_payment: totals.periodic_payment,
            final_value: totals.final_value,
            total_interest: totals.total_interest,
            yearly_rate: rate.yearly_rate,
            original_value: principal_out,
            term_months: scenario.term_months,
            currency: converter.output(),
        })
    }
}

fn internal_failure(e: crate::LoanSimError) -> SimulationResult {
    error!(error = %e, "simulation failed");
    SimulationResult::failure(FailureKind::Internal, e.to_string())
}
