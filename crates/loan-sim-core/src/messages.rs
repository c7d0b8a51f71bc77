//! Human-readable text for failure kinds.

use crate::simulation::result::{FailureKind, SimulationResult};

pub const DEFAULT_LOCALE: &str = "en";

pub trait MessageResolver: Send + Sync {
    fn resolve(&self, kind: FailureKind, locale: &str) -> String;
}

/// Built-in bundles for `en` and `pt-BR`. Any other locale falls back to `en`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledMessages;

impl BundledMessages {
    fn english(kind: FailureKind) -> &'static str {
        match kind {
            FailureKind::FutureBirthDate => "Birth date cannot be in the future.",
            FailureKind::PrincipalTooLow => "Loan amount must be at least 1.",
            FailureKind::NonPositiveTerm => "Number of months must be greater than zero.",
            FailureKind::BorrowerTooYoung => "Borrower must be at least 18 years old.",
            FailureKind::TermTooLong => "Loan duration exceeds the maximum allowed.",
            FailureKind::PrincipalTooHigh => "Loan amount exceeds the maximum allowed.",
            FailureKind::Internal => "An unexpected error occurred while simulating the loan.",
        }
    }

    fn portuguese(kind: FailureKind) -> &'static str {
        match kind {
            FailureKind::FutureBirthDate => "A data de nascimento não pode estar no futuro.",
            FailureKind::PrincipalTooLow => "O valor do empréstimo deve ser de pelo menos 1.",
            FailureKind::NonPositiveTerm => "O número de meses deve ser maior que zero.",
            FailureKind::BorrowerTooYoung => "O solicitante deve ter pelo menos 18 anos.",
            FailureKind::TermTooLong => "A duração do empréstimo excede o máximo permitido.",
            FailureKind::PrincipalTooHigh => "O valor do empréstimo excede o máximo permitido.",
            FailureKind::Internal => "Ocorreu um erro inesperado ao simular o empréstimo.",
        }
    }
}

impl MessageResolver for BundledMessages {
    fn resolve(&self, kind: FailureKind, locale: &str) -> String {
        let text = match locale.replace('_', "-").to_ascii_lowercase().as_str() {
            "pt" | "pt-br" => Self::portuguese(kind),
            _ => Self::english(kind),
        };
        text.to_string()
    }
}

/// Rewrite a failure's message in `locale`. Successes pass through.
pub fn localize(
    result: SimulationResult,
    resolver: &dyn MessageResolver,
    locale: &str,
) -> SimulationResult {
    match result {
        SimulationResult::Failure { kind, .. } => SimulationResult::Failure {
            kind,
            message: resolver.resolve(kind, locale),
        },
        success => success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locales() {
        let messages = BundledMessages;
        assert_eq!(
            messages.resolve(FailureKind::TermTooLong, "en"),
            "Loan duration exceeds the maximum allowed."
        );
        assert_eq!(
            messages.resolve(FailureKind::TermTooLong, "pt_BR"),
            "A duração do empréstimo excede o máximo permitido."
        );
        assert_eq!(
            messages.resolve(FailureKind::Internal, "fr"),
            messages.resolve(FailureKind::Internal, DEFAULT_LOCALE)
        );
    }

    #[test]
    fn test_localize_rewrites_failures_only() {
        let failure = SimulationResult::failure(FailureKind::PrincipalTooLow, "raw");
        let localized = localize(failure, &BundledMessages, "pt-BR");
        assert_eq!(
            localized,
            SimulationResult::failure(
                FailureKind::PrincipalTooLow,
                "O valor do empréstimo deve ser de pelo menos 1."
            )
        );
    }
}
