//! Engine configuration, loaded once at startup and shared read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyTable;
use crate::lending::rates::BracketTable;
use crate::lending::validation::ValidationLimits;
use crate::lending::variable_rate::VariableRateConfig;
use crate::{LoanSimError, LoanSimResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Upper bound on simulations running at once. 0 means one per
    /// available core.
    pub max_concurrency: usize,
}

impl BatchConfig {
    pub fn effective_concurrency(&self) -> usize {
        if self.max_concurrency > 0 {
            self.max_concurrency
        } else {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub brackets: BracketTable,
    pub currencies: CurrencyTable,
    pub limits: ValidationLimits,
    pub variable_rate: VariableRateConfig,
    pub batch: BatchConfig,
}

impl EngineConfig {
    /// Parse YAML. An empty document yields the defaults.
    pub fn from_yaml_str(source: &str) -> LoanSimResult<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> LoanSimResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> LoanSimResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            LoanSimError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&source),
            Some("yaml" | "yml") => Self::from_yaml_str(&source),
            _ => Err(LoanSimError::Configuration(format!(
                "unsupported config format: {} (expected .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> LoanSimResult<()> {
        self.brackets.validate()?;
        self.currencies.validate()?;
        self.limits.validate()?;
        self.variable_rate.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EngineConfig::from_yaml_str("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::from_yaml_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
brackets:
  - { max_age: 30, yearly_rate: "0.06" }
  - { yearly_rate: "0.03" }
currencies: { BRL: "1", USD: "5.0", EUR: "6.0", JPY: "0.05", CNY: "0.85" }
limits: { min_age: 21, max_term_months: 360 }
variable_rate: { drift_step: "0" }
batch: { max_concurrency: 4 }
"#;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.brackets.brackets().len(), 2);
        assert_eq!(config.brackets.brackets()[1].max_age, None);
        assert_eq!(config.currencies.rate(Currency::USD), Some(dec!(5.0)));
        assert_eq!(config.limits.min_age, 21);
        assert_eq!(config.limits.max_principal, dec!(99999999));
        assert_eq!(config.variable_rate.drift_step, dec!(0));
        assert_eq!(config.batch.effective_concurrency(), 4);
    }

    #[test]
    fn test_json_partial_sections() {
        let config = EngineConfig::from_json_str(r#"{"batch":{"max_concurrency":2}}"#).unwrap();
        assert_eq!(config.batch.max_concurrency, 2);
        assert_eq!(config.brackets, BracketTable::default());
    }

    #[test]
    fn test_invalid_brackets_rejected_at_load() {
        let yaml = "brackets:\n  - { max_age: 30, yearly_rate: \"0.05\" }\n";
        let err = EngineConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, LoanSimError::Configuration(_)));
    }

    #[test]
    fn test_malformed_document() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LoanSimError::SerializationError(_)));
    }

    #[test]
    fn test_default_concurrency_is_positive() {
        assert!(BatchConfig::default().effective_concurrency() >= 1);
    }
}
