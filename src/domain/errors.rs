use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the portfolio and signal engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid weight for {security_id}: {weight} (expected a finite value in 0..=100)")]
    InvalidWeight { security_id: String, weight: f64 },

    #[error("Invalid capital: {capital} (must be > 0)")]
    InvalidCapital { capital: Decimal },

    #[error("Invalid price for {security_id}: {price} (must be > 0)")]
    InvalidPrice { security_id: String, price: Decimal },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Security not held in portfolio: {security_id}")]
    UnknownSecurity { security_id: String },

    #[error("No eligible entries: select at least one security with a known price")]
    NoEligibleEntries,

    #[error("Indicator setup failed: {reason}")]
    Indicator { reason: String },
}

impl EngineError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_price_formatting() {
        let error = EngineError::InvalidPrice {
            security_id: "SBER".to_string(),
            price: dec!(-1.5),
        };

        let msg = error.to_string();
        assert!(msg.contains("SBER"));
        assert!(msg.contains("-1.5"));
    }

    #[test]
    fn test_invalid_weight_formatting() {
        let error = EngineError::InvalidWeight {
            security_id: "GAZP".to_string(),
            weight: 120.0,
        };

        let msg = error.to_string();
        assert!(msg.contains("GAZP"));
        assert!(msg.contains("120"));
    }
}
