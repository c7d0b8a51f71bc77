pub mod clock;
pub mod config;
pub mod currency;
pub mod error;
pub mod lending;
pub mod messages;
pub mod notify;
pub mod simulation;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BatchConfig, EngineConfig};
pub use currency::{convert, CurrencyTable, MonetaryConverter};
pub use error::LoanSimError;
pub use lending::scenario::{LoanScenario, SimulationRequest, VariableRateScenario};
pub use lending::validation::{ValidationErrorKind, ValidationLimits};
pub use lending::variable_rate::{PaymentStep, VariableRateConfig, VariableRateLoanSimulation};
pub use messages::{BundledMessages, MessageResolver};
pub use notify::{LogNotifier, NoopNotifier, Notifier, NotifyError, QueueNotifier};
pub use simulation::orchestrator::LoanSimulator;
pub use simulation::result::{FailureKind, LoanSimulation, Simulation, SimulationResult};
pub use types::*;

#[cfg(feature = "batch")]
pub use simulation::batch::run_batch;

/// Standard result type for all loan-sim operations
pub type LoanSimResult<T> = Result<T, LoanSimError>;
