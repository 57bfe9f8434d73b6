// Key generation configuration

use crate::error::{Error, Result};

/// Default false-prime tolerance: a composite survives Miller-Rabin with
/// probability at most 2^-128
pub const DEFAULT_TOLERANCE_EXPONENT: i32 = -128;

/// Default number of candidates drawn per prime before giving up
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;

/// Configuration for the key generator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub tolerance_exponent: i32,
    pub max_attempts: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tolerance_exponent: DEFAULT_TOLERANCE_EXPONENT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    pub fn with_tolerance_exponent(mut self, exponent: i32) -> Self {
        self.tolerance_exponent = exponent;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Check the configuration before it drives a prime search
    pub fn validate(&self) -> Result<()> {
        if self.tolerance_exponent >= 0 {
            return Err(Error::Validation(format!(
                "tolerance exponent must be negative, got {}",
                self.tolerance_exponent
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::Validation(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.tolerance_exponent, -128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_negative_tolerance() {
        let config = GeneratorConfig::default().with_tolerance_exponent(0);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let config = GeneratorConfig::default().with_max_attempts(0);
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }
}
