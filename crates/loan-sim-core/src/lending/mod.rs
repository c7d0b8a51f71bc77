pub mod age;
pub mod amortization;
pub mod rates;
pub mod scenario;
pub mod validation;
pub mod variable_rate;
